use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::i18n::Language;
use crate::location::Coordinates;
use crate::types::{Category, Department, Role, Status, VoteDirection};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "reporter")]
#[command(about = "Report and follow civic issues in English or Arabic", version)]
#[command(after_help = "EXAMPLES:
    reporter signin -e citizen@mail.com -p 'Passw0rd'   Sign in as a citizen
    reporter issues --status pending                    List pending issues
    reporter report -t \"Pothole\" --category Roads ...   Report a new issue
    reporter issue approve 12                           Approve an issue (government)
    reporter language ar                                Switch to Arabic")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Display language for this invocation only
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in
    #[command(
        alias = "login",
        after_help = "EXAMPLES:
    reporter signin -e citizen@mail.com -p 'Passw0rd'
    reporter signin -e officer@city.gov -p 'Passw0rd' --department publicWorks
    reporter signin -e EMP-1234 -p 'Passw0rd' --role government --department health"
    )]
    Signin(SignInArgs),
    /// Create an account
    #[command(after_help = "EXAMPLES:
    reporter signup -e sara@mail.com -p 'Passw0rd' --username sara --national-id 9876543210 --phone +962791234567
    reporter signup -e officer@city.gov -p 'Passw0rd' --role government --department health --employee-id EMP-77")]
    Signup(SignUpArgs),
    /// Sign out
    #[command(
        alias = "logout",
        after_help = "EXAMPLES:
    reporter signout"
    )]
    Signout,
    /// Request a password reset link
    #[command(after_help = "EXAMPLES:
    reporter forgot-password sara@mail.com
    reporter forgot-password EMP-1234 --role government")]
    ForgotPassword {
        /// Email address, or employee ID for government users
        identifier: String,

        /// Account type
        #[arg(long, value_enum, default_value = "regular")]
        role: Role,
    },
    /// Show the signed-in user
    #[command(after_help = "EXAMPLES:
    reporter profile
    reporter profile --json")]
    Profile,
    /// Manage issues
    #[command(
        alias = "i",
        after_help = "EXAMPLES:
    reporter issue list --category Roads
    reporter issue view 12
    reporter issue edit 12 --title-en \"Pothole near school\"
    reporter issue reject 12 --reason \"Duplicate report\"
    reporter issue vote 12 up"
    )]
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// List issues (alias for 'issue list')
    #[command(
        alias = "is",
        after_help = "EXAMPLES:
    reporter issues
    reporter issues --search pothole --status pending --status in-progress
    reporter issues --department waterAuthority --format compact"
    )]
    Issues(IssueListArgs),
    /// Report a new issue
    #[command(
        alias = "r",
        after_help = "EXAMPLES:
    reporter report -t \"Broken streetlight\" -d \"Dark for a week\" --category Utilities \\
        --department electricity --location \"King Abdullah St\" --coords 31.95,35.91
    reporter report -t \"Overflowing bin\" -d \"Not collected\" --category Sanitation \\
        --department environment --location \"Park\" --here --photo ./bin.jpg"
    )]
    Report(ReportArgs),
    /// List issues you reported
    #[command(after_help = "EXAMPLES:
    reporter my-reports")]
    MyReports,
    /// Manage saved drafts
    #[command(after_help = "EXAMPLES:
    reporter drafts list
    reporter drafts view draft-4f2c...
    reporter drafts discard draft-4f2c...")]
    Drafts {
        #[command(subcommand)]
        action: DraftCommands,
    },
    /// Show community statistics
    #[command(after_help = "EXAMPLES:
    reporter stats
    reporter stats --json")]
    Stats,
    /// Show or switch the display language
    #[command(
        alias = "lang",
        after_help = "EXAMPLES:
    reporter language
    reporter language ar"
    )]
    Language {
        /// Language to switch to
        #[arg(value_enum)]
        language: Option<Language>,
    },
    /// Open an in-app path such as /issue/12
    #[command(after_help = "EXAMPLES:
    reporter open /issues
    reporter open /issue/12
    reporter open /issues/12/report-problem")]
    Open {
        /// Path to open
        path: String,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    reporter completions bash > ~/.bash_completion.d/reporter
    reporter completions zsh > ~/.zfunc/_reporter
    reporter completions fish > ~/.config/fish/completions/reporter.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    reporter init")]
    Init,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    reporter issue list
    reporter issue list --category Roads --status pending"
    )]
    List(IssueListArgs),
    /// View issue details
    #[command(
        alias = "v",
        after_help = "EXAMPLES:
    reporter issue view 12"
    )]
    View {
        /// Issue ID
        id: String,
    },
    /// Edit an issue you reported (government users may edit any issue)
    #[command(
        alias = "e",
        after_help = "EXAMPLES:
    reporter issue edit 12 --title-en \"Pothole near school\" --title-ar \"حفرة قرب المدرسة\"
    reporter issue edit 12 --category Safety"
    )]
    Edit(IssueEditArgs),
    /// Save an issue with optional edits as a draft
    #[command(after_help = "EXAMPLES:
    reporter issue draft 12
    reporter issue draft 12 --description-en \"More details to add later\"")]
    Draft(IssueEditArgs),
    /// Delete an issue
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    reporter issue delete 12
    reporter issue delete 12 --yes"
    )]
    Delete {
        /// Issue ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Approve a pending issue (government)
    #[command(after_help = "EXAMPLES:
    reporter issue approve 12")]
    Approve {
        /// Issue ID
        id: String,
    },
    /// Reject a pending issue with a reason (government)
    #[command(after_help = "EXAMPLES:
    reporter issue reject 12 --reason \"Duplicate of #9\"")]
    Reject {
        /// Issue ID
        id: String,

        /// Reason shown to the reporter
        #[arg(long, short)]
        reason: String,
    },
    /// Return an issue to pending (government)
    #[command(after_help = "EXAMPLES:
    reporter issue revert 12")]
    Revert {
        /// Issue ID
        id: String,
    },
    /// Mark an in-progress issue as resolved (government)
    #[command(after_help = "EXAMPLES:
    reporter issue resolve 12")]
    Resolve {
        /// Issue ID
        id: String,
    },
    /// List comments on an issue
    #[command(after_help = "EXAMPLES:
    reporter issue comments 12")]
    Comments {
        /// Issue ID
        id: String,
    },
    /// Comment on or rate an issue
    #[command(after_help = "EXAMPLES:
    reporter issue comment 12 \"Same problem on my street\"
    reporter issue comment 12 --rating 4")]
    Comment(CommentArgs),
    /// Vote on an issue; repeating the same vote removes it
    #[command(after_help = "EXAMPLES:
    reporter issue vote 12 up
    reporter issue vote 12 down")]
    Vote {
        /// Issue ID
        id: String,

        /// Vote direction
        #[arg(value_enum)]
        direction: VoteDirection,
    },
    /// Report a problem with an issue, such as a duplicate
    #[command(after_help = "EXAMPLES:
    reporter issue report-problem 12 \"This was fixed last month\"")]
    ReportProblem {
        /// Issue ID
        id: String,

        /// What is wrong with the report
        description: String,
    },
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// List your drafts
    #[command(alias = "ls")]
    List,
    /// View a draft
    #[command(alias = "v")]
    View {
        /// Draft ID
        id: String,
    },
    /// Discard a draft
    #[command(alias = "rm")]
    Discard {
        /// Draft ID
        id: String,
    },
}

#[derive(Args, Clone)]
pub struct SignInArgs {
    /// Email address, or employee ID for government users
    #[arg(long, short)]
    pub email: String,

    /// Password
    #[arg(long, short)]
    pub password: String,

    /// Department (required for government users)
    #[arg(long)]
    pub department: Option<Department>,

    /// Sign in with this account type instead of guessing from the email
    #[arg(long, value_enum)]
    pub role: Option<Role>,
}

#[derive(Args, Clone)]
pub struct SignUpArgs {
    /// Email address
    #[arg(long, short)]
    pub email: String,

    /// Password (8+ characters with upper, lower case and a digit)
    #[arg(long, short)]
    pub password: String,

    /// Account type
    #[arg(long, value_enum, default_value = "regular")]
    pub role: Role,

    /// Username (regular users)
    #[arg(long)]
    pub username: Option<String>,

    /// 10-digit national ID (regular users)
    #[arg(long)]
    pub national_id: Option<String>,

    /// Phone number (regular users)
    #[arg(long)]
    pub phone: Option<String>,

    /// Department (government users)
    #[arg(long)]
    pub department: Option<Department>,

    /// Employee ID (government users)
    #[arg(long)]
    pub employee_id: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct IssueListArgs {
    /// Text to find in the title, description or location
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only these categories (repeatable)
    #[arg(long)]
    pub category: Vec<Category>,

    /// Only these statuses (repeatable)
    #[arg(long)]
    pub status: Vec<Status>,

    /// Only these departments (repeatable, ignored for government users)
    #[arg(long)]
    pub department: Vec<Department>,
}

#[derive(Args, Clone)]
pub struct IssueEditArgs {
    /// Issue ID
    pub id: String,

    /// New English title
    #[arg(long)]
    pub title_en: Option<String>,

    /// New Arabic title
    #[arg(long)]
    pub title_ar: Option<String>,

    /// New English description
    #[arg(long)]
    pub description_en: Option<String>,

    /// New Arabic description
    #[arg(long)]
    pub description_ar: Option<String>,

    /// New English location
    #[arg(long)]
    pub location_en: Option<String>,

    /// New Arabic location
    #[arg(long)]
    pub location_ar: Option<String>,

    /// New category
    #[arg(long)]
    pub category: Option<Category>,

    /// New department
    #[arg(long)]
    pub department: Option<Department>,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Short title
    #[arg(long, short)]
    pub title: Option<String>,

    /// What is wrong
    #[arg(long, short)]
    pub description: Option<String>,

    /// Category (Roads, Utilities, Sanitation, Safety, Public Spaces, Other)
    #[arg(long)]
    pub category: Option<Category>,

    /// Department responsible for the issue
    #[arg(long)]
    pub department: Option<Department>,

    /// Where the issue is, in words
    #[arg(long, short)]
    pub location: Option<String>,

    /// Map position as lat,lng
    #[arg(long, conflicts_with = "here")]
    pub coords: Option<Coordinates>,

    /// Use the current location from the config file
    #[arg(long)]
    pub here: bool,

    /// Photo or document to attach (JPEG, PNG or PDF, repeatable)
    #[arg(long)]
    pub photo: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CommentArgs {
    /// Issue ID
    pub id: String,

    /// Comment text
    pub body: Option<String>,

    /// Star rating from 1 to 5
    #[arg(long)]
    pub rating: Option<u8>,
}
