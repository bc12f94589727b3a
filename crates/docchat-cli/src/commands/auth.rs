use anyhow::{Result, bail};
use colored::Colorize;

use docchat_application::DocchatServices;
use docchat_core::user::{Gender, SigninRequest, SignupRequest};

pub async fn signin(services: &DocchatServices, email: String, password: String) -> Result<()> {
    let user = services
        .auth
        .signin(&SigninRequest {
            user_email: email,
            user_pwd: password,
        })
        .await?;
    println!("Signed in as {} ({})", user.user_name.bold(), user.role());
    Ok(())
}

pub async fn signup(
    services: &DocchatServices,
    name: String,
    email: String,
    password: String,
    mobile: String,
    gender: Gender,
) -> Result<()> {
    services
        .auth
        .signup(&SignupRequest {
            user_name: name,
            user_email: email,
            user_pwd: password,
            user_mobile: mobile,
            gender,
            is_active: true,
        })
        .await?;
    Ok(())
}

pub async fn logout(services: &DocchatServices) {
    services.logout().await;
    println!("Signed out");
}

pub async fn whoami(services: &DocchatServices) -> Result<()> {
    match services.auth.current_user().await {
        Some(user) => println!(
            "{} <{}> id={} role={}",
            user.user_name.bold(),
            user.user_email,
            user.user_id,
            user.role()
        ),
        None => bail!("Not signed in"),
    }
    Ok(())
}

pub async fn users(services: &DocchatServices) -> Result<()> {
    for user in services.admin.list_users().await? {
        let status = if user.is_active {
            "active".green()
        } else {
            "inactive".bright_black()
        };
        println!(
            "{:>5}  {:<20} {:<30} {:<8} {}",
            user.user_id, user.user_name, user.user_email, user.gender, status
        );
    }
    Ok(())
}
