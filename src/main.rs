mod auth;
mod hibp;
mod input;
mod logging;
mod report;
mod runner;
mod settings;

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Password};
use std::error::Error;

use auth::key_store::{self, SystemKeyring};
use hibp::client::HibpClient;
use report::{console, csv_export};
use runner::pacer::Pacer;
use settings::layered::{self, CliArgs};
use settings::prompt::{self, Interactive, NoPrompt, Prompt};
use settings::Profile;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();

    // ==============================
    // 🔑 API KEY MANAGEMENT
    // ==============================
    if args.len() >= 3 && args[1] == "key" {
        match args[2].as_str() {
            "set" => {
                let key = Password::with_theme(&ColorfulTheme::default())
                    .with_prompt("Enter your Have I Been Pwned API key")
                    .interact()?;
                key_store::save_key(key.trim())?;
                println!("✅ API key saved securely!");
            }
            "clear" => {
                key_store::delete_key()?;
                println!("✅ Stored API key removed");
            }
            other => println!("❌ Unknown key command: {}", other),
        }
        return Ok(());
    }

    if let Err(e) = run(&args).await {
        eprintln!("{}", format!("{}.. Exiting!", e).red());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let cli = CliArgs::parse(args);

    let config_file = cli.config_file.clone().or_else(layered::default_config_file);
    let settings = layered::load(config_file.as_deref())?.apply_cli(&cli);

    let mut prompt: Box<dyn Prompt> = if cli.no_prompt {
        Box::new(NoPrompt)
    } else {
        Box::new(Interactive::new())
    };

    let config = prompt::resolve(settings, prompt.as_mut(), &SystemKeyring)?;

    println!(
        "{}",
        format!("Loading data from: {}..", config.input_path.display()).cyan()
    );
    let emails = input::load_emails(&config.input_path)?;

    if emails.is_empty() {
        println!(
            "{}",
            format!(
                "Unable to find any records. Check for data in: {}",
                config.input_path.display()
            )
            .yellow()
        );
    } else {
        println!("{}", format!("Success! {} emails found!\n", emails.len()).green());
    }

    let Some(service) = config.service else {
        println!("{}", "No service selected, nothing to check.".yellow());
        return Ok(());
    };
    println!("{}", format!("Service chosen: {}", service.label()).cyan());

    let client = HibpClient::new(
        config.base_url.clone(),
        config.api_key.clone(),
        config.user_agent.clone(),
    );
    let mut pacer = Pacer::new(config.request_delay);

    println!("{}", format!("Running service checks on: {}", service).cyan());
    let findings = runner::run_checks(&client, &emails, service, &mut pacer).await?;

    match config.profile {
        Profile::Export => {
            let summary = csv_export::export(&findings, &config.output)?;
            println!(
                "{}",
                format!(
                    "Successfully written {} rows to {}",
                    summary.rows,
                    summary.path.display()
                ).green()
            );
            if summary.duplicates > 0 {
                println!("   ({} duplicate rows dropped)", summary.duplicates);
            }

            let open_now = match config.output.open_after {
                Some(open) => open,
                None => prompt.open_now(&summary.path)?,
            };
            if open_now {
                csv_export::open_report(&summary.path)?;
            }
        }
        Profile::Summary => console::print_summary(&findings),
    }

    Ok(())
}
