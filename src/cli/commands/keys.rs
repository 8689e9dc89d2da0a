//! cli::commands::keys
//!
//! SSH public keys used to push code to the builder.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};

use super::{parse_args, Session};
use crate::cli::args::{KeysAdd, KeysList, KeysRemove};
use crate::core::types::PublicKey;
use crate::ui::output::{list_header, short_key};
use crate::ui::{prompts, Console};

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<KeysList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let keys = session
        .call(console, session.client.list_keys(session.limit(&args.limit)))
        .await?;

    let out = console.out();
    write!(
        out,
        "{}",
        list_header(
            &format!("{} Keys", session.profile.username),
            keys.items.len(),
            keys.total
        )
    )?;
    for key in &keys.items {
        writeln!(out, "{} {}", key.id, short_key(&key.public))?;
    }
    Ok(())
}

pub async fn add(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<KeysAdd>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let key = match args.key.as_deref() {
        Some(path) => PublicKey::from_file(Path::new(path))?,
        None => {
            let found = local_keys(&ssh_dir()?)?;
            choose_key(console, &found)?
        }
    };

    write!(console.out(), "Uploading {} to drydock... ", file_name(&key.source))?;
    session
        .call_with_progress(console, session.client.add_key(&key.id, &key.public))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

pub async fn remove(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<KeysRemove>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    write!(console.out(), "Removing {} SSH Key... ", args.key)?;
    session
        .call_with_progress(console, session.client.remove_key(&args.key))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

fn ssh_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine the home directory"))?;
    Ok(home.join(".ssh"))
}

/// Every `*.pub` key in `dir`, sorted by file name.
fn local_keys(dir: &Path) -> Result<Vec<PublicKey>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "pub"))
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| PublicKey::from_file(path).map_err(Into::into))
        .collect()
}

fn choose_key(console: &mut Console, keys: &[PublicKey]) -> Result<PublicKey> {
    {
        let out = console.out();
        writeln!(out, "Found the following SSH public keys:")?;
        for (index, key) in keys.iter().enumerate() {
            writeln!(out, "{}) {} {}", index + 1, file_name(&key.source), key.id)?;
        }
        writeln!(out, "0) Enter path to pubfile (or use keys:add <key_path>)")?;
    }

    let answer = prompts::input(console, "Which would you like to use with drydock? ")?;
    let choice: usize = answer
        .parse()
        .map_err(|_| anyhow!("{} is not a valid integer", answer))?;
    if choice > keys.len() {
        bail!("{} is not a valid option", choice);
    }

    if choice == 0 {
        let path = prompts::input(console, "Enter the path to the pubkey file: ")?;
        return Ok(PublicKey::from_file(Path::new(&path))?);
    }

    Ok(keys[choice - 1].clone())
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSA: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQDOIbkxf8NOq5n4WPuBLOeOt0jVNxRcWZJH0fwmw1cSzGsXG4y1Vp7GeUlM0A3hRVsuPfZ7Kq2x8GqSBtOvFpY3Bb bob@laptop";

    fn key_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("id_rsa.pub"), RSA).unwrap();
        std::fs::write(dir.path().join("id_rsa"), "private").unwrap();
        dir
    }

    #[test]
    fn only_public_keys_are_offered() {
        let dir = key_dir();
        let keys = local_keys(dir.path()).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].id, "bob");
    }

    #[test]
    fn chooser_returns_the_selected_key() {
        let dir = key_dir();
        let keys = local_keys(dir.path()).unwrap();
        let (mut console, capture) = Console::captured("1\n");

        let key = choose_key(&mut console, &keys).unwrap();
        assert_eq!(key.id, "bob");
        assert_eq!(
            capture.stdout(),
            "Found the following SSH public keys:\n\
             1) id_rsa.pub bob\n\
             0) Enter path to pubfile (or use keys:add <key_path>)\n\
             Which would you like to use with drydock? "
        );
    }

    #[test]
    fn chooser_rejects_bad_answers() {
        let (mut console, _) = Console::captured("x\n");
        let err = choose_key(&mut console, &[]).unwrap_err();
        assert_eq!(err.to_string(), "x is not a valid integer");

        let (mut console, _) = Console::captured("3\n");
        let err = choose_key(&mut console, &[]).unwrap_err();
        assert_eq!(err.to_string(), "3 is not a valid option");
    }

    #[test]
    fn option_zero_reads_a_path() {
        let dir = key_dir();
        let path = dir.path().join("id_rsa.pub");
        let (mut console, _) = Console::captured(&format!("0\n{}\n", path.display()));
        let key = choose_key(&mut console, &[]).unwrap();
        assert_eq!(key.public, RSA);
    }
}
