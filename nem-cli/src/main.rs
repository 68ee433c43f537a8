//! nemkey
//!
//! Command-line interface for NEM account keys: generation, address
//! derivation, and password-protected private keys.

mod settings;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Password;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nem_core::{CryptoConfig, EncryptedPrivateKeyBlob, NetworkVersion, PrivateKey, PublicKey};
use nem_crypto::{derive_address, generate_keypair, generate_public_key, parse_address};
use nem_keystore::{EncryptedPrivateKeyStore, PasswordManager};

use crate::settings::FileSettingsStore;

/// nemkey - NEM account key tool
#[derive(Parser)]
#[command(name = "nemkey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Network for addresses (mainnet, testnet, mijin)
    #[arg(short, long, global = true, env = "NEM_NETWORK")]
    network: Option<NetworkVersion>,

    /// PBKDF2 iteration count
    #[arg(long, global = true, env = "NEM_KDF_ROUNDS")]
    kdf_rounds: Option<u32>,

    /// Settings file holding the salt and password token
    #[arg(long, global = true, env = "NEM_SETTINGS", default_value = "nemkey-settings.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Generate {
        /// Output file for the account (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Derive the public key and address of a private key
    Derive {
        /// Private key (hex)
        private_key: String,
    },

    /// Derive the address of a public key
    Address {
        /// Public key (hex)
        public_key: String,
    },

    /// Check an address and its checksum
    Validate {
        /// Address, plain or dash-grouped
        address: String,
    },

    /// Manage the application password
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Encrypt a private key under the application password
    Protect {
        /// Private key (hex)
        private_key: String,
        /// Password (prompted if omitted)
        #[arg(long, env = "NEM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Decrypt a protected private key
    Reveal {
        /// Encrypted blob (hex of IV || ciphertext)
        blob: String,
        /// Password (prompted if omitted)
        #[arg(long, env = "NEM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Set or replace the password
    Set {
        /// New password (prompted if omitted)
        #[arg(long, env = "NEM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Check a password against the stored token
    Check {
        /// Password (prompted if omitted)
        #[arg(long, env = "NEM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "nem=debug,info"
    } else {
        "nem=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Generate { output } => cmd_generate(&config, output),
        Commands::Derive { private_key } => cmd_derive(&config, &private_key),
        Commands::Address { public_key } => cmd_address(&config, &public_key),
        Commands::Validate { address } => cmd_validate(&config, &address),
        Commands::Password { action } => match action {
            PasswordAction::Set { password } => cmd_password_set(&config, &cli.settings, password),
            PasswordAction::Check { password } => {
                cmd_password_check(&config, &cli.settings, password)
            }
        },
        Commands::Protect {
            private_key,
            password,
        } => cmd_protect(&config, &cli.settings, &private_key, password),
        Commands::Reveal { blob, password } => cmd_reveal(&config, &cli.settings, &blob, password),
    }
}

/// Environment first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<CryptoConfig> {
    let mut config = CryptoConfig::from_env().context("Invalid NEM_* environment")?;

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(rounds) = cli.kdf_rounds {
        config.kdf.rounds = rounds;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn open_store(
    config: &CryptoConfig,
    settings: &Path,
) -> Result<EncryptedPrivateKeyStore<FileSettingsStore>> {
    let file = FileSettingsStore::open(settings)
        .with_context(|| format!("Failed to open settings file {}", settings.display()))?;
    Ok(EncryptedPrivateKeyStore::new(
        PasswordManager::new(file, config.kdf),
        config.network,
    ))
}

fn read_password(given: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    let prompt = Password::new().with_prompt("Password");
    let password = if confirm {
        prompt
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?
    } else {
        prompt.interact()?
    };
    Ok(password)
}

/// Generate a new key pair
fn cmd_generate(config: &CryptoConfig, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔑 Generating key pair...".cyan().bold());

    let keypair = generate_keypair().context("Failed to generate key pair")?;
    let address = derive_address(&keypair.public, config.network);

    let keys_json = serde_json::json!({
        "private_key": keypair.private.to_hex().as_str(),
        "public_key": keypair.public.to_hex(),
        "address": address.to_string(),
        "network": config.network.name(),
    });

    if let Some(path) = output {
        write_secret_file(&path, &serde_json::to_string_pretty(&keys_json)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "✅ Keys saved to:".green(), path.display());
        println!(
            "{}",
            "⚠️  This file holds the private key in plain text.".red().bold()
        );
        println!("   Protect the key with `nemkey protect`, then delete the file.");
    } else {
        println!("\n{}", "Keys (JSON):".yellow().bold());
        println!("{}", serde_json::to_string_pretty(&keys_json)?);
    }

    println!("\n{}", "⚠️  IMPORTANT: Keep your private key safe!".red().bold());
    println!("   Use `nemkey protect` to store it encrypted.");

    Ok(())
}

/// Writes `contents` readable by the owner only (on Unix).
fn write_secret_file(path: &Path, contents: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // `mode` only applies to new files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Derive public key and address from a private key
fn cmd_derive(config: &CryptoConfig, private_key: &str) -> Result<()> {
    let private = PrivateKey::from_hex(private_key).context("Invalid private key")?;
    let public = generate_public_key(&private);
    let address = derive_address(&public, config.network);

    println!("   {} {}", "Public key:".dimmed(), public);
    println!("   {} {}", "Address:".green(), address);
    println!("   {} {}", "Display:".dimmed(), address.to_pretty());

    Ok(())
}

/// Derive an address from a public key
fn cmd_address(config: &CryptoConfig, public_key: &str) -> Result<()> {
    let public = PublicKey::from_hex(public_key).context("Invalid public key")?;
    let address = derive_address(&public, config.network);

    println!("   {} {}", "Address:".green(), address);
    println!("   {} {}", "Display:".dimmed(), address.to_pretty());

    Ok(())
}

/// Validate an address
fn cmd_validate(config: &CryptoConfig, address: &str) -> Result<()> {
    let parsed = parse_address(address).context("Invalid address")?;

    if parsed.network() != config.network {
        bail!(
            "Address belongs to {}, expected {}",
            parsed.network(),
            config.network
        );
    }

    println!("{} {}", "✅ Valid address:".green().bold(), parsed);
    println!("   {} {}", "Network:".dimmed(), parsed.network());
    Ok(())
}

/// Set the application password
fn cmd_password_set(config: &CryptoConfig, settings: &Path, password: Option<String>) -> Result<()> {
    let store = open_store(config, settings)?;
    let manager = store.password_manager();

    if manager.is_password_set()? {
        println!("{}", "⚠️  Replacing existing password.".yellow());
        println!("   Keys protected under the old password will no longer reveal.");
    }

    let password = read_password(password, true)?;
    manager
        .set_password(&password)
        .context("Failed to set password")?;

    println!("{} {}", "✅ Password stored in:".green(), settings.display());
    Ok(())
}

/// Check the application password
fn cmd_password_check(config: &CryptoConfig, settings: &Path, password: Option<String>) -> Result<()> {
    let store = open_store(config, settings)?;
    let manager = store.password_manager();

    if !manager.is_password_set()? {
        bail!("No password set; run `nemkey password set` first");
    }

    let password = read_password(password, false)?;
    if manager.check_password(&password) {
        println!("{}", "✅ Password correct".green().bold());
        Ok(())
    } else {
        bail!("Password incorrect")
    }
}

/// Encrypt a private key
fn cmd_protect(
    config: &CryptoConfig,
    settings: &Path,
    private_key: &str,
    password: Option<String>,
) -> Result<()> {
    let store = open_store(config, settings)?;
    let private = PrivateKey::from_hex(private_key).context("Invalid private key")?;

    let password = read_password(password, false)?;
    let blob = store
        .protect(&private, &password)
        .context("Failed to protect private key")?;

    println!("{}", "🔒 Encrypted private key:".cyan().bold());
    println!("{}", blob);
    Ok(())
}

/// Decrypt a private key
fn cmd_reveal(config: &CryptoConfig, settings: &Path, blob: &str, password: Option<String>) -> Result<()> {
    let store = open_store(config, settings)?;
    let blob = EncryptedPrivateKeyBlob::from_hex(blob).context("Invalid encrypted blob")?;

    let password = read_password(password, false)?;
    let private = store
        .reveal(&blob, &password)
        .context("Failed to reveal private key")?;
    let public = generate_public_key(&private);

    println!("{}", "🔓 Private key:".cyan().bold());
    println!("{}", private.to_hex().as_str());
    println!("   {} {}", "Address:".green(), derive_address(&public, config.network));
    Ok(())
}
