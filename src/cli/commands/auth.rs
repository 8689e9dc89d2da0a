//! cli::commands::auth
//!
//! Account commands: register, log in and out, change passwords, cancel
//! accounts and rotate tokens.
//!
//! # Credentials
//!
//! A successful login or registration writes the token to the selected
//! profile before anything else runs. The token is never printed.

use std::io::Write;

use anyhow::{bail, Result};

use super::{parse_args, Session};
use crate::cli::args::{
    AuthCancel, AuthLogin, AuthLogout, AuthPasswd, AuthRegenerate, AuthRegister, AuthWhoami,
};
use crate::controller::types::{Registration, User};
use crate::controller::ApiError;
use crate::core::profile::Profile;
use crate::ui::{prompts, Console};

pub async fn register(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthRegister>(console, argv)? else {
        return Ok(());
    };
    let mut session = Session::connect(&args.global, &args.controller, args.ssl_verify)?;

    // An admin already logged in to this controller registers on behalf of others.
    let existing = Profile::load(args.global.config())
        .ok()
        .map(|(profile, _)| profile)
        .filter(|profile| !profile.token.is_empty())
        .filter(|profile| {
            profile
                .client()
                .is_ok_and(|client| client.host() == session.client.host())
        });
    if let Some(profile) = &existing {
        session.client = profile.client()?;
    }

    session
        .call(console, session.client.check_connection())
        .await?;

    let username = match args.username {
        Some(username) => username,
        None => prompts::input(console, "username: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => {
            let password = prompts::password(console, "password: ")?;
            let confirm = prompts::password(console, "password (confirm): ")?;
            if password != confirm {
                bail!("Password mismatch, aborting registration.");
            }
            password
        }
    };
    let email = match args.email {
        Some(email) => email,
        None => prompts::input(console, "email: ")?,
    };

    let registration = Registration {
        username: username.clone(),
        password: password.clone(),
        email,
    };
    session
        .call(console, session.client.register(&registration))
        .await?;
    writeln!(console.out(), "Registered {}", username)?;

    if existing.is_some() {
        return Ok(());
    }

    let session = Session::connect(&args.global, &args.controller, args.ssl_verify)?;
    log_in(console, session, &username, &password).await
}

pub async fn login(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthLogin>(console, argv)? else {
        return Ok(());
    };
    let session = Session::connect(&args.global, &args.controller, args.ssl_verify)?;
    prompt_and_log_in(console, session, args.username, args.password).await
}

pub async fn logout(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthLogout>(console, argv)? else {
        return Ok(());
    };
    Profile::delete(args.global.config())?;
    writeln!(console.out(), "Logged out")?;
    Ok(())
}

pub async fn passwd(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthPasswd>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let password = match (&args.password, &args.username) {
        (Some(password), _) => password.clone(),
        (None, Some(_)) => String::new(),
        (None, None) => prompts::password(console, "current password: ")?,
    };

    let new_password = match args.new_password {
        Some(new_password) => new_password,
        None => {
            let new_password = prompts::password(console, "new password: ")?;
            let confirm = prompts::password(console, "new password (confirm): ")?;
            if new_password != confirm {
                bail!("Password mismatch, not changing.");
            }
            new_password
        }
    };

    session
        .call(
            console,
            session
                .client
                .change_password(args.username.as_deref(), &password, &new_password),
        )
        .await?;
    writeln!(console.out(), "Password change succeeded.")?;
    Ok(())
}

pub async fn whoami(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthWhoami>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let user = session.call(console, session.client.whoami()).await?;
    if args.all {
        write!(console.out(), "{}", format_user(&user))?;
    } else {
        writeln!(
            console.out(),
            "You are {} at {}",
            user.username,
            session.client.controller_display()
        )?;
    }
    Ok(())
}

pub async fn cancel(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthCancel>(console, argv)? else {
        return Ok(());
    };
    let mut session = Session::load(&args.global)?;

    let username = args.username.filter(|username| !username.is_empty());
    if username.is_none() || args.password.is_some() {
        writeln!(
            console.out(),
            "Please log in again in order to cancel this account"
        )?;
        let fresh = Session::connect(
            &args.global,
            &session.profile.controller,
            session.profile.ssl_verify,
        )?;
        prompt_and_log_in(console, fresh, username.clone(), args.password.clone()).await?;
        session = Session::load(&args.global)?;
    }

    let target = username
        .clone()
        .unwrap_or_else(|| session.profile.username.clone());

    if !args.yes {
        let question = format!(
            "cancel account {} at {}? (y/N): ",
            target,
            session.client.controller_display()
        );
        if !prompts::confirm(console, &question)? {
            writeln!(console.err(), "Account not changed")?;
            return Ok(());
        }
    }

    match session
        .call(console, session.client.cancel_account(username.as_deref()))
        .await
    {
        Ok(()) => {}
        Err(ApiError::Conflict(_)) => bail!(
            "{} still has applications associated with it. Transfer ownership or delete them first",
            target
        ),
        Err(err) => return Err(err.into()),
    }

    if target == session.profile.username {
        Profile::delete(args.global.config())?;
    }
    writeln!(console.out(), "Account cancelled")?;
    Ok(())
}

pub async fn regenerate(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AuthRegenerate>(console, argv)? else {
        return Ok(());
    };
    let mut session = Session::load(&args.global)?;
    let username = args.username.filter(|username| !username.is_empty());

    let token = session
        .call(
            console,
            session
                .client
                .regenerate_token(username.as_deref(), args.all),
        )
        .await?;

    if let (None, false, Some(token)) = (&username, args.all, token) {
        session.profile.token = token;
        session.profile.write(&session.path)?;
    }

    writeln!(console.out(), "Token Regenerated")?;
    Ok(())
}

async fn prompt_and_log_in(
    console: &mut Console,
    session: Session,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    session
        .call(console, session.client.check_connection())
        .await?;

    let username = match username {
        Some(username) => username,
        None => prompts::input(console, "username: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => prompts::password(console, "password: ")?,
    };

    log_in(console, session, &username, &password).await
}

/// Exchange credentials for a token and persist the new profile.
async fn log_in(
    console: &mut Console,
    mut session: Session,
    username: &str,
    password: &str,
) -> Result<()> {
    let token = session
        .call(console, session.client.login(username, password))
        .await?;

    session.profile.username = username.to_string();
    session.profile.token = token;
    session.profile.write(&session.path)?;
    tracing::info!(username, path = %session.path.display(), "logged in");

    writeln!(
        console.out(),
        "Logged in as {}\nConfiguration file written to {}",
        username,
        session.path.display()
    )?;
    Ok(())
}

fn format_user(user: &User) -> String {
    let rows = [
        ("ID", user.id.to_string()),
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("First Name", user.first_name.clone()),
        ("Last Name", user.last_name.clone()),
        ("Last Login", user.last_login.clone().unwrap_or_default()),
        ("Is Superuser", user.is_superuser.to_string()),
        ("Is Staff", user.is_staff.to_string()),
        ("Is Active", user.is_active.to_string()),
        ("Date Joined", user.date_joined.clone()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<14}{}\n", format!("{}:", label), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_details_are_aligned() {
        let user = User {
            username: "jkirk".into(),
            id: 7,
            email: "jkirk@example.com".into(),
            is_superuser: true,
            ..Default::default()
        };
        let text = format_user(&user);
        assert!(text.starts_with("ID:           7\nUsername:     jkirk\n"));
        assert!(text.contains("Is Superuser: true\n"));
        assert!(text.contains("Last Login:   \n"));
    }
}
