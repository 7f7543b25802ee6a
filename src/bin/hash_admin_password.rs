//! Prints an argon2 hash for `APP_ADMIN_PASSWORD_HASH`.
//!
//! ```text
//! echo -n 'my password' | cargo run --bin hash_admin_password
//! ```

use std::io::{self, Read};

use anyhow::{bail, Context};
use portfolio_cms::auth::password::hash_password;

fn main() -> anyhow::Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read password from stdin")?;

    let password = input.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let hash = hash_password(password).map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}", hash);
    Ok(())
}
