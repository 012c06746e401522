use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use wedding_content::config::cli::{
    Command, GuestbookCommand, RsvpCommand, SiteConfigCommand, WaitlistCommand,
};
use wedding_content::content::{images, timeline};
use wedding_content::domain::model::{GuestbookRequest, RsvpRequest, SiteConfigUpdate};
use wedding_content::utils::{logger, validation::Validate};
use wedding_content::{
    AppConfig, Cli, ContentError, ImageEnv, LocalStorage, SubmissionService, TracingNotifier,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    let mut config = AppConfig::load_or_default(cli.config.as_ref())
        .context("failed to load configuration")?;
    config.apply_env_overrides()?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> wedding_content::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> wedding_content::Result<()> {
    match command {
        Command::Images { key, env } => {
            let env = match env {
                Some(env) => env.parse::<ImageEnv>()?,
                None => config.images.env,
            };
            let resolver = config.images.resolver(env);
            tracing::debug!("Resolving images for {} from {}", env, resolver.base_path());

            match key {
                Some(key) => match resolver.resolve(&key) {
                    Some(url) => println!("{}", url),
                    None => {
                        return Err(ContentError::NotFound {
                            what: format!("Image key '{}'", key),
                        })
                    }
                },
                None => {
                    for (key, url) in resolver.resolve_all() {
                        println!("{:<22} {}", key, url);
                    }
                }
            }
        }
        Command::Timeline { id } => match id {
            Some(id) => {
                let entry = timeline::by_id(id).ok_or_else(|| ContentError::NotFound {
                    what: format!("Timeline entry {}", id),
                })?;
                print_json(entry)?;
            }
            None => print_json(timeline::all())?,
        },
        Command::Photos => {
            for photo in timeline::all_images() {
                let entry = photo.timeline_item;
                println!(
                    "{} {} [{}] {} - {}",
                    entry.icon,
                    timeline::format_date(entry.year, entry.month),
                    entry.title,
                    photo.image.title,
                    photo.image.src
                );
            }
        }
        Command::Progress => {
            let progress = timeline::current_progress();
            println!("{:.1}%", progress * 100.0);
        }
        Command::Check => {
            let mismatched = images::key_parity_mismatches();
            if !mismatched.is_empty() {
                return Err(ContentError::ValidationError {
                    message: format!("Image keys differ between environments: {}", mismatched.join(", ")),
                });
            }

            let duplicates = timeline::duplicate_ids(timeline::all());
            if !duplicates.is_empty() {
                return Err(ContentError::ValidationError {
                    message: format!("Duplicate timeline ids: {:?}", duplicates),
                });
            }

            println!("✅ Content and configuration are consistent");
        }
        Command::Rsvp(cmd) => {
            let service = submission_service(config).await?;
            match cmd {
                RsvpCommand::Submit { name, attendance, song } => {
                    let receipt = service
                        .submit_rsvp(
                            RsvpRequest {
                                name: Some(name),
                                attendance,
                                song,
                            },
                            None,
                        )
                        .await?;
                    print_json(&receipt)?;
                }
                RsvpCommand::List => print_json(&service.list_rsvps().await)?,
                RsvpCommand::Stats => print_json(&service.rsvp_stats().await)?,
            }
        }
        Command::Guestbook(cmd) => {
            let service = submission_service(config).await?;
            match cmd {
                GuestbookCommand::Submit { name, relationship, message } => {
                    let receipt = service
                        .submit_guestbook(
                            GuestbookRequest {
                                name: Some(name),
                                relationship: Some(relationship),
                                message: Some(message),
                            },
                            None,
                        )
                        .await?;
                    print_json(&receipt)?;
                }
                GuestbookCommand::List => print_json(&service.recent_guestbook().await)?,
            }
        }
        Command::Waitlist(cmd) => {
            let service = submission_service(config).await?;
            match cmd {
                WaitlistCommand::Submit { name, song } => {
                    let receipt = service
                        .submit_waitlist(
                            RsvpRequest {
                                name: Some(name),
                                attendance: None,
                                song,
                            },
                            None,
                        )
                        .await?;
                    print_json(&receipt)?;
                }
                WaitlistCommand::List => print_json(&service.list_waitlist().await)?,
            }
        }
        Command::SiteConfig(cmd) => {
            let service = submission_service(config).await?;
            match cmd {
                SiteConfigCommand::Show => print_json(&service.site_config().await)?,
                SiteConfigCommand::Set {
                    show_hotel_info,
                    hotel_name,
                    hotel_address,
                    booking_link,
                } => {
                    let updated = service
                        .update_site_config(SiteConfigUpdate {
                            show_hotel_info,
                            hotel_name,
                            hotel_address,
                            booking_link,
                        })
                        .await?;
                    print_json(&updated)?;
                }
            }
        }
        Command::Health => {
            let service = submission_service(config).await?;
            print_json(&service.health().await)?;
        }
    }

    Ok(())
}

async fn submission_service(
    config: &AppConfig,
) -> wedding_content::Result<SubmissionService<LocalStorage, TracingNotifier>> {
    let storage = LocalStorage::new(config.data_dir());
    let notifier = TracingNotifier::new(
        config.notifications.enabled,
        config.notifications.couple_email.clone(),
    );

    let service = SubmissionService::new(storage, notifier);
    service.ensure_data_files().await?;
    Ok(service)
}
