//! `skillsurge auth ...`

use anyhow::{Context, Result};

use skillsurge::state::AuthState;

use super::Ctx;

pub async fn login(ctx: &Ctx, email: &str, password: &str) -> Result<()> {
    let mut auth = AuthState::new(ctx.api.clone());
    let user = auth
        .login(email, password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("login failed")?;
    ctx.emit(user, |u| println!("Signed in as {} ({})", u.display_name(), u.id))
}

pub async fn register(ctx: &Ctx, email: &str, password: &str, name: Option<&str>) -> Result<()> {
    let mut auth = AuthState::new(ctx.api.clone());
    let user = auth
        .register(email, password, name)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("registration failed")?;
    let confirmed = ctx.api.session().access_token().is_some();
    ctx.emit(user, |u| {
        println!("Account created for {} ({})", u.display_name(), u.id);
        if !confirmed {
            println!("Check your inbox to confirm the address, then run `skillsurge auth login`.");
        }
    })
}

pub async fn logout(ctx: &Ctx) -> Result<()> {
    let mut auth = AuthState::new(ctx.api.clone());
    auth.logout().await.context("failed to clear session")?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &Ctx) -> Result<()> {
    let mut auth = AuthState::new(ctx.api.clone());
    match auth.restore().await? {
        Some(user) => ctx.emit(user, |u| {
            println!("{} <{}>", u.display_name(), u.email);
            println!("id: {}", u.id);
        }),
        None => {
            match ctx.api.session().user_id() {
                Some(id) => println!("Not signed in (anonymous user id {id})."),
                None => println!("Not signed in."),
            }
            Ok(())
        }
    }
}

pub async fn refresh(ctx: &Ctx) -> Result<()> {
    if ctx.api.session().refresh_token().is_none() {
        println!("No refresh token stored; nothing to do.");
        return Ok(());
    }
    let mut auth = AuthState::new(ctx.api.clone());
    auth.refresh().await?;
    if ctx.api.session().access_token().is_some() {
        println!("Session refreshed.");
    } else {
        println!("Refresh was rejected; signed out. Run `skillsurge auth login`.");
    }
    Ok(())
}

pub async fn reset_password(ctx: &Ctx, email: &str) -> Result<()> {
    let ack = ctx
        .api
        .reset_password(email)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("password reset failed")?;
    println!(
        "{}",
        ack.message
            .as_deref()
            .unwrap_or("If the address is registered, a reset link is on its way.")
    );
    Ok(())
}
