pub mod auth;
pub mod comments;
pub mod drafts;
pub mod init;
pub mod issues;
pub mod language;
pub mod navigate;
pub mod stats;

use std::io::{self, Write};

use const_format::concatcp;

use crate::config::Config;
use crate::error::Result;
use crate::i18n::{self, Language, Localized};
use crate::routes::{authorize, Access, Route};
use crate::session::SessionManager;
use crate::storage::FileStorage;
use crate::store::Store;

const BIN: &str = "reporter";

const SIGN_IN_HINT: Localized = Localized::new(
    concatcp!("Run '", BIN, " signin --help' to sign in."),
    concatcp!("استخدم '", BIN, " signin --help' لتسجيل الدخول."),
);
const REDIRECTING: Localized = Localized::new("Redirecting to", "جارٍ التحويل إلى");

/// Everything a command needs: configuration, the restored session, the
/// issue store and the active display language.
pub struct Context {
    pub config: Config,
    pub session: SessionManager<FileStorage>,
    pub store: Store,
    pub language: Language,
}

impl Context {
    /// Open storage and the issue store, restore the session and resolve the
    /// display language (`--lang`, then the stored choice, then config).
    pub fn open(config: Config, language: Option<Language>) -> Result<Self> {
        let storage = FileStorage::open(config.storage_path()?)?;
        let session = SessionManager::open(storage);
        tracing::debug!(
            storage = %session.storage().path().display(),
            loading = session.is_loading(),
            signed_in = session.current().is_some(),
            "session restored"
        );
        let store = Store::open(config.store_path()?)?;

        let language = language
            .unwrap_or_else(|| i18n::load(session.storage(), config.default_language()));
        tracing::debug!(language = language.code(), "active language");

        Ok(Self {
            config,
            session,
            store,
            language,
        })
    }

    pub fn text(&self, message: Localized) -> &'static str {
        message.get(self.language)
    }

    /// Run the route guard. On a redirect, say where the user is sent and
    /// return false.
    pub fn guard(&self, route: &Route) -> bool {
        match authorize(route, self.session.current()) {
            Access::Granted => true,
            Access::Redirect(target) => {
                eprintln!("{} {target}", self.text(REDIRECTING));
                if target == Route::SignIn {
                    eprintln!("{}", self.text(SIGN_IN_HINT));
                }
                false
            }
        }
    }
}

/// Ask a yes/no question on stdin. Anything but `y` (or `ن`) is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer == "ن")
}
