//! # Sales Robot Dashboard - CLI
//!
//! Line-based front end over [`dashboard::App`]. Each loop iteration renders
//! the current screen and handles one command.
//!
//! ## Configuration
//!
//! - `DASHBOARD_API_URL`: backend base URL (default `http://127.0.0.1:3001`)
//! - `DASHBOARD_SESSION_FILE`: saved session (default `data/session.json`)
//! - `DASHBOARD_MOCK=1`: use the in-process mock backend
//! - `DASHBOARD_LOG_DIR` / `DASHBOARD_LOG_LEVEL`: see [`dashboard::debug`]

use dashboard::app::handlers::IntegrationDraft;
use dashboard::app::{RegistrationStep, StepStatus};
use dashboard::debug::{self, LogConfig};
use dashboard::services::api::DEFAULT_API_URL;
use dashboard::services::storage::DEFAULT_SESSION_FILE;
use dashboard::{ApiClient, App, FileSessionStore, MockGateway, RemoteGateway, Screen};
use lib_utils::get_env_or;
use shared::{format_currency, format_minutes, format_phone, IntegrationKind, ServiceType};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = debug::init(&LogConfig::from_env());

    let gateway: Arc<dyn RemoteGateway> = if get_env_or("DASHBOARD_MOCK", "0") == "1" {
        tracing::info!("Using mock gateway");
        Arc::new(MockGateway::new())
    } else {
        Arc::new(ApiClient::new(&get_env_or("DASHBOARD_API_URL", DEFAULT_API_URL))?)
    };
    let store = Arc::new(FileSessionStore::new(get_env_or(
        "DASHBOARD_SESSION_FILE",
        DEFAULT_SESSION_FILE,
    )));

    let mut app = App::new(gateway, store);
    let mut prompt = Prompt::new();

    loop {
        println!("\n=== {} ===", app.screen().title());
        let keep_going = match app.screen() {
            Screen::Landing => landing(&mut app, &mut prompt).await?,
            Screen::Register => register(&mut app, &mut prompt).await?,
            Screen::Login => login(&mut app, &mut prompt).await?,
            Screen::Dashboard => dashboard(&mut app, &mut prompt).await?,
            Screen::Payment => payment(&mut app, &mut prompt).await?,
        };
        if !keep_going {
            break;
        }
    }

    tracing::info!("Dashboard closed");
    Ok(())
}

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Trimmed next line, `None` at end of input.
    async fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{}: ", label);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }
}

fn report<T>(result: dashboard::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            println!("! {}", err);
            None
        }
    }
}

async fn landing(app: &mut App, prompt: &mut Prompt) -> anyhow::Result<bool> {
    println!("1) Register  2) Sign in  q) Quit");
    let Some(choice) = prompt.ask(">").await? else {
        return Ok(false);
    };
    match choice.as_str() {
        "1" => {
            app.navigate(Screen::Register);
        }
        "2" => {
            app.navigate(Screen::Login);
        }
        "q" => return Ok(false),
        _ => println!("Unknown command"),
    }
    Ok(true)
}

async fn register(app: &mut App, prompt: &mut Prompt) -> anyhow::Result<bool> {
    let step = app.registration.step();
    println!("{} (empty to go back)", step.title());

    let label = match step {
        RegistrationStep::Phone => "Phone",
        RegistrationStep::Code => "Code",
        RegistrationStep::Password => "Password",
        RegistrationStep::Done => {
            app.navigate(Screen::Dashboard);
            return Ok(true);
        }
    };
    let Some(input) = prompt.ask(label).await? else {
        return Ok(false);
    };

    if input.is_empty() {
        if step == RegistrationStep::Phone {
            app.navigate(Screen::Landing);
        } else {
            app.register_back();
        }
        return Ok(true);
    }

    match step {
        RegistrationStep::Phone => {
            if report(app.register_phone(&input).await).is_some() {
                if let Some(phone) = app.registration.phone() {
                    println!("Code sent to {}", format_phone(phone));
                }
            }
        }
        RegistrationStep::Code => {
            report(app.register_code(&input).await);
        }
        RegistrationStep::Password => {
            if let Some(auth) = report(app.register_password(&input).await) {
                println!("{}", auth.message);
            }
        }
        RegistrationStep::Done => {}
    }
    Ok(true)
}

async fn login(app: &mut App, prompt: &mut Prompt) -> anyhow::Result<bool> {
    println!("Empty phone to go back");
    let Some(phone) = prompt.ask("Phone").await? else {
        return Ok(false);
    };
    if phone.is_empty() {
        app.navigate(Screen::Landing);
        return Ok(true);
    }
    let Some(password) = prompt.ask("Password").await? else {
        return Ok(false);
    };

    if let Some(auth) = report(app.login(&phone, &password).await) {
        println!("{}", auth.message);
    }
    Ok(true)
}

async fn dashboard(app: &mut App, prompt: &mut Prompt) -> anyhow::Result<bool> {
    let (done, total) = app.gate.required_progress();
    if let Some(user) = &app.state.user {
        println!("{}  |  setup {}/{}", format_phone(&user.phone), done, total);
    }
    for (i, step) in app.gate.steps().iter().enumerate() {
        let marker = match app.gate.status(step.id) {
            StepStatus::Completed => "[x]",
            StepStatus::Active => "[>]",
            StepStatus::Available => "[ ]",
            StepStatus::Locked => "[-]",
        };
        println!("{} {}. {} - {}", marker, i + 1, step.display_name, step.description);
    }
    println!("1-4) Open step  a) Fill active step  n) Next  t) Test call  r) Refresh  p) Tariffs  l) Log out  q) Quit");

    let Some(choice) = prompt.ask(">").await? else {
        return Ok(false);
    };
    match choice.as_str() {
        "1" | "2" | "3" | "4" => {
            let index = choice.parse::<usize>().unwrap_or(1) - 1;
            let step_id = app.gate.steps()[index].id;
            if !app.select_step(step_id) {
                println!("Finish the previous steps first");
            }
        }
        "a" => fill_step(app, prompt).await?,
        "n" => match app.gate.next_step() {
            Some(next) => {
                app.select_step(next);
            }
            None => println!("Finish this step first"),
        },
        "t" => {
            if let Some(phone) = prompt.ask("Phone to call").await? {
                if let Some(call) = report(app.test_call(&phone).await) {
                    println!("Call {} {:?}, wait {}", call.call_id, call.status, call.estimated_wait);
                }
            }
        }
        "r" => {
            if let Some(user) = report(app.refresh_profile().await) {
                println!("Balance: {}", format_currency(user.balance));
            }
        }
        "p" => {
            app.navigate(Screen::Payment);
            report(app.load_tariffs().await);
        }
        "l" => app.logout(),
        "q" => return Ok(false),
        _ => println!("Unknown command"),
    }
    Ok(true)
}

async fn fill_step(app: &mut App, prompt: &mut Prompt) -> anyhow::Result<()> {
    match app.gate.selected_step() {
        "knowledge" => {
            let Some(text) = prompt.ask("Describe your product (question and answer lines, use | for new lines)").await? else {
                return Ok(());
            };
            if let Some(items) = report(app.process_knowledge(&text.replace('|', "\n")).await) {
                for item in items {
                    println!("- {}: {}", item.question, item.answer);
                }
            }
        }
        "integrations" => {
            let name = prompt.ask("CRM name").await?.unwrap_or_default();
            let api_key = prompt.ask("API key").await?.unwrap_or_default();
            let url = prompt.ask("Webhook URL").await?.unwrap_or_default();
            let draft = IntegrationDraft {
                kind: IntegrationKind::Crm,
                name,
                api_key,
                url,
            };
            if let Some(integration) = report(app.save_integration(draft)) {
                println!("Connected {}", integration.name);
            }

            let numbers = prompt.ask("Numbers to call, separated by ; (optional)").await?;
            if let Some(numbers) = numbers.filter(|n| !n.is_empty()) {
                if let Some(count) = report(app.import_phone_numbers(&numbers.replace(';', "\n"))) {
                    println!("Imported {} numbers", count);
                }
            }
        }
        "settings" => {
            let mut settings = app.state.call_settings.clone();
            let dnd = prompt.ask("Do not disturb (y/n)").await?.unwrap_or_default();
            settings.do_not_disturb.enabled = dnd == "y";
            if settings.do_not_disturb.enabled {
                settings.do_not_disturb.start_time = ask_or(prompt, "Quiet from (HH:MM)", &settings.do_not_disturb.start_time).await?;
                settings.do_not_disturb.end_time = ask_or(prompt, "Quiet until (HH:MM)", &settings.do_not_disturb.end_time).await?;
            }
            let max = ask_or(prompt, "Max concurrent calls", &settings.max_concurrent_calls.to_string()).await?;
            match max.parse() {
                Ok(max) => settings.max_concurrent_calls = max,
                Err(_) => {
                    println!("! Enter a number");
                    return Ok(());
                }
            }
            if report(app.save_settings(settings)).is_some() {
                println!("Settings saved");
            }
        }
        "balance" => {
            let balance = app.balance().unwrap_or_default();
            println!("Balance: {}", format_currency(balance));
            report(app.complete_balance());
        }
        other => tracing::warn!(step_id = other, "No form for step"),
    }
    Ok(())
}

async fn ask_or(prompt: &mut Prompt, label: &str, current: &str) -> anyhow::Result<String> {
    let answer = prompt.ask(&format!("{} [{}]", label, current)).await?;
    Ok(answer
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| current.to_string()))
}

async fn payment(app: &mut App, prompt: &mut Prompt) -> anyhow::Result<bool> {
    let selected = app.tariffs.selected().map(|t| t.id.clone());
    for tariff in app.tariffs.tariffs() {
        let marker = if Some(&tariff.id) == selected.as_ref() { ">" } else { " " };
        let popular = if tariff.is_popular { " (popular)" } else { "" };
        println!(
            "{} {} - {}, {}{}",
            marker,
            tariff.name,
            format_minutes(tariff.minutes),
            format_currency(tariff.price),
            popular
        );
    }
    println!("Service: {:?}", app.tariffs.service_type());
    println!("<id>) Choose tariff  i/o) Incoming/Outgoing  a) Activate  b) Back  q) Quit");

    let Some(choice) = prompt.ask(">").await? else {
        return Ok(false);
    };
    match choice.as_str() {
        "i" => app.set_service_type(ServiceType::Incoming),
        "o" => app.set_service_type(ServiceType::Outgoing),
        "a" => {
            if let Some(intent) = report(app.activate_service().await) {
                println!(
                    "Payment {} for {} is {}",
                    intent.id,
                    format_currency(intent.amount),
                    intent.status
                );
            }
        }
        "b" => {
            app.navigate(Screen::Dashboard);
        }
        "q" => return Ok(false),
        id => {
            if !app.select_tariff(id) {
                println!("Unknown tariff");
            }
        }
    }
    Ok(true)
}
