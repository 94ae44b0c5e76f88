//! Account commands.

use anyhow::Result;
use dialoguer::{Input, Password};

use harvest_session::AuthSession;

use super::{AuthArgs, AuthCommand, Friendly};
use crate::context::Context;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Signup => signup(ctx).await,
        AuthCommand::Signin => signin(ctx).await,
        AuthCommand::Signout => signout(ctx),
        AuthCommand::Whoami => whoami(ctx).await,
    }
}

async fn signup(ctx: &Context) -> Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let spinner = ctx.output.spinner("Creating account...");
    let result = ctx.client.auth().sign_up(&email, &username, &password).await;
    spinner.finish_and_clear();
    let response = result.friendly()?;

    ctx.output.success(&response.message);
    ctx.output.info("Sign in with `harvest auth signin`.");
    Ok(())
}

async fn signin(ctx: &Context) -> Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let mut session = AuthSession::load(ctx.client.clone()).friendly()?;

    let spinner = ctx.output.spinner("Signing in...");
    let result = session.login_with(&email, &password).await;
    spinner.finish_and_clear();
    let username = result.friendly()?;

    ctx.output.success(&format!("Signed in as {}", username));
    Ok(())
}

fn signout(ctx: &Context) -> Result<()> {
    let mut session = AuthSession::load(ctx.client.clone()).friendly()?;

    if !session.is_authenticated() {
        ctx.output.info("Not signed in.");
        return Ok(());
    }

    session.logout().friendly()?;
    ctx.output
        .success("Signed out. Your cart is kept for next time.");
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Checking session...");
    let result = ctx.client.auth().is_logged_in().await;
    spinner.finish_and_clear();
    let status = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&status);
        return Ok(());
    }

    if !status.is_logged_in {
        ctx.output.info("Not signed in.");
        return Ok(());
    }

    if let Some(username) = &status.username {
        ctx.output.kv("Username", username);
    }
    if let Some(email) = &status.email {
        ctx.output.kv("Email", email);
    }

    // Admin check failures just mean no badge.
    let is_admin = ctx
        .client
        .auth()
        .is_admin()
        .await
        .map(|a| a.is_admin)
        .unwrap_or(false);
    if is_admin {
        ctx.output.kv("Role", "admin");
    }
    Ok(())
}
