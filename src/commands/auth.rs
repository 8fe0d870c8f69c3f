use crate::cli::{SignInArgs, SignUpArgs};
use crate::error::Result;
use crate::i18n::{labels, Localized};
use crate::output;
use crate::session::SignUpProfile;
use crate::types::Role;
use crate::validation;

use super::Context;

const SIGNED_IN: Localized = Localized::new("Signed in as", "تم تسجيل الدخول باسم");
const SIGNED_UP: Localized = Localized::new("Account created for", "تم إنشاء الحساب لـ");
const SIGNED_OUT: Localized = Localized::new("Signed out.", "تم تسجيل الخروج.");
const NEXT: Localized = Localized::new("Next:", "التالي:");
const NOT_SIGNED_IN: Localized = Localized::new("You are not signed in.", "أنت غير مسجل الدخول.");
const RESET_SENT_REGULAR: Localized = Localized::new(
    "If an account exists for that email, a password reset link has been sent.",
    "إذا كان هناك حساب بهذا البريد الإلكتروني، فقد تم إرسال رابط إعادة تعيين كلمة المرور.",
);
const RESET_SENT_GOVERNMENT: Localized = Localized::new(
    "Your password reset request has been sent to your administrator.",
    "تم إرسال طلب إعادة تعيين كلمة المرور إلى المسؤول.",
);

/// Check the identifier the way the sign-in form does: an email address, or
/// an employee ID for government users signing in without one.
fn check_identifier(identifier: &str, role: Option<Role>) -> Result<()> {
    if identifier.is_empty() {
        return Ok(());
    }
    if role == Some(Role::Government) && !identifier.contains('@') {
        validation::employee_id(identifier)
    } else {
        validation::email(identifier)
    }
}

pub async fn sign_in(ctx: &mut Context, args: SignInArgs) -> Result<()> {
    check_identifier(&args.email, args.role)?;
    if let Some(department) = &args.department {
        validation::department(department)?;
    }

    let landing = ctx
        .session
        .sign_in(&args.email, &args.password, args.department, args.role)
        .await?;

    if let Some(user) = ctx.session.current() {
        output::print_message(&format!("{} {}", ctx.text(SIGNED_IN), user.display_name()));
    }
    output::print_message(&format!("{} {landing}", ctx.text(NEXT)));
    Ok(())
}

pub async fn sign_up(ctx: &mut Context, args: SignUpArgs) -> Result<()> {
    validation::email(&args.email)?;
    validation::password(&args.password)?;

    match args.role {
        Role::Regular => {
            if let Some(username) = &args.username {
                validation::username(username)?;
            }
            if let Some(national_id) = &args.national_id {
                validation::national_id(national_id)?;
            }
            if let Some(phone) = &args.phone {
                validation::phone_number(phone)?;
            }
        }
        Role::Government => {
            if let Some(employee_id) = &args.employee_id {
                validation::employee_id(employee_id)?;
            }
            if let Some(department) = &args.department {
                validation::department(department)?;
            }
        }
    }

    let landing = ctx
        .session
        .sign_up(SignUpProfile {
            email: args.email,
            password: args.password,
            role: args.role,
            username: args.username,
            national_id: args.national_id,
            phone_number: args.phone,
            department: args.department,
            employee_id: args.employee_id,
        })
        .await?;

    if let Some(user) = ctx.session.current() {
        output::print_message(&format!("{} {}", ctx.text(SIGNED_UP), user.email));
    }
    output::print_message(&format!("{} {landing}", ctx.text(NEXT)));
    Ok(())
}

pub fn sign_out(ctx: &mut Context) -> Result<()> {
    ctx.session.sign_out()?;
    output::print_message(ctx.text(SIGNED_OUT));
    Ok(())
}

pub async fn forgot_password(ctx: &Context, identifier: &str, role: Role) -> Result<()> {
    let identifier = identifier.trim();
    check_identifier(identifier, Some(role))?;

    ctx.session.request_password_reset(identifier, role).await?;

    let sent = match role {
        Role::Regular => RESET_SENT_REGULAR,
        Role::Government => RESET_SENT_GOVERNMENT,
    };
    output::print_message(ctx.text(sent));
    Ok(())
}

pub fn profile(ctx: &Context) -> Result<()> {
    let Some(user) = ctx.session.current() else {
        output::print_message(ctx.text(NOT_SIGNED_IN));
        return Ok(());
    };

    let lang = ctx.language;
    output::print_item(user, |user| {
        println!("{}", user.display_name());
        println!();
        println!("{:<14}{}", labels::EMAIL.get(lang), user.email);
        println!("{:<14}{}", labels::ROLE.get(lang), user.role().label(lang));
        if let Some(department) = user.department() {
            println!("{:<14}{}", labels::DEPARTMENT.get(lang), department.label(lang));
        }
        if let Some(employee_id) = &user.employee_id {
            println!("{:<14}{employee_id}", labels::EMPLOYEE_ID.get(lang));
        }
        if let Some(national_id) = &user.national_id {
            println!("{:<14}{national_id}", labels::NATIONAL_ID.get(lang));
        }
        if let Some(phone) = &user.phone_number {
            println!("{:<14}{phone}", labels::PHONE.get(lang));
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_identifier() {
        assert!(check_identifier("citizen@mail.com", None).is_ok());
        assert!(check_identifier("EMP-1234", Some(Role::Government)).is_ok());
        assert!(check_identifier("EMP-1234", None).is_err());
        assert!(check_identifier("officer@city.gov", Some(Role::Government)).is_ok());
        assert!(check_identifier("", Some(Role::Regular)).is_ok());
    }
}
