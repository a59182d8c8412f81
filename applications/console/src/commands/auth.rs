use super::Console;
use anyhow::Result;
use muse_core::{LoginCredentials, Registration};
use tracing::info;

pub async fn login(console: &Console, email: String, password: String) -> Result<()> {
    let credentials = LoginCredentials::new(email, password);
    console.client.login(&credentials).await?;
    info!(
        path = %console.config.session.credential_path.display(),
        "Credential stored"
    );
    println!("Sesión iniciada.");
    Ok(())
}

pub async fn register(
    console: &Console,
    name: String,
    lastname: String,
    email: String,
    password: String,
    confirm_password: Option<String>,
) -> Result<()> {
    let registration = Registration {
        name,
        lastname,
        email,
        confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
        password,
    };
    console.client.register(&registration).await?;
    println!("Cuenta creada. Inicie sesión con `muse login`.");
    Ok(())
}

pub async fn logout(console: &Console) -> Result<()> {
    console.client.logout().await?;
    println!("Sesión cerrada.");
    Ok(())
}
