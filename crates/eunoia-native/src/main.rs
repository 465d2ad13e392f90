use anyhow::Context;
use clap::{Parser, Subcommand};
use eunoia_core::style::orb_style;
use eunoia_core::{
    generate_field, ChatAssistant, ColorVariant, ContactForm, Density, FieldConfig,
    ManualScheduler, Phase, Sender, SiteConfig, Typewriter, TypewriterCycler,
};
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "eunoia-preview", version, about = "Preview the Eunoia landing page from a terminal")]
struct Cli {
    /// Site configuration (TOML). Defaults to the built-in one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip real-time waits; timers fire immediately.
    #[arg(long, global = true)]
    fast: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an ambient field and print its orbs
    Field {
        /// Start from this section's field settings
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        count: Option<i32>,
        #[arg(long)]
        density: Option<Density>,
        #[arg(long)]
        color: Option<ColorVariant>,
        #[arg(long)]
        max_opacity: Option<f32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print orbs as JSON
        #[arg(long, conflicts_with = "css")]
        json: bool,
        /// Print each orb's inline style
        #[arg(long)]
        css: bool,
    },
    /// Run the hero typewriter in the terminal
    Typewriter {
        /// Phrases to cycle (defaults to the hero phrases)
        #[arg(long = "phrase")]
        phrases: Vec<String>,
        /// Stop after this many phrases have been typed and deleted
        #[arg(long)]
        cycles: Option<usize>,
    },
    /// Talk to the chat assistant. Reads lines from stdin when no message is given.
    Chat { message: Vec<String> },
    /// Validate a contact form submission
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        service: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Field {
            section,
            count,
            density,
            color,
            max_opacity,
            seed,
            json,
            css,
        } => {
            let (base, default_seed) = match section.as_deref() {
                Some(id) => {
                    let index = config
                        .sections
                        .iter()
                        .position(|s| s.id == id)
                        .with_context(|| format!("no section `{id}` in site configuration"))?;
                    (config.sections[index].field.clone(), config.section_seed(index))
                }
                None => (FieldConfig::default(), config.seed),
            };
            let field = FieldConfig {
                orb_count: count.unwrap_or(base.orb_count),
                density: density.unwrap_or(base.density),
                color_variant: color.unwrap_or(base.color_variant),
                max_opacity: max_opacity.unwrap_or(base.max_opacity),
            };
            run_field(&field, seed.unwrap_or(default_seed), json, css)
        }
        Command::Typewriter { phrases, cycles } => {
            let phrases = if phrases.is_empty() {
                config.hero.phrases.clone()
            } else {
                phrases
            };
            let cycles = cycles.unwrap_or(phrases.len().max(1));
            run_typewriter(Typewriter::new(phrases, config.hero.timing), cycles, cli.fast)
        }
        Command::Chat { message } => run_chat(message.join(" "), cli.fast),
        Command::Contact {
            name,
            email,
            service,
            message,
        } => run_contact(ContactForm {
            name,
            email,
            service,
            message,
        }),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::builtin()?);
    };
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = SiteConfig::from_toml_str(&src)?;
    log::info!("[config] loaded {} sections from {}", config.sections.len(), path.display());
    Ok(config)
}

fn run_field(config: &FieldConfig, seed: u64, json: bool, css: bool) -> anyhow::Result<()> {
    let orbs = generate_field(config, seed);
    log::info!(
        "[field] {} orbs ({} x {}), seed {seed:#x}",
        orbs.len(),
        config.orb_count,
        config.density
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&orbs)?);
        return Ok(());
    }
    if css {
        for orb in &orbs {
            println!("{}", orb_style(orb));
        }
        return Ok(());
    }
    println!(
        "{:>3}  {:<12} {:>5} {:>8} {:>8}  {:<7} {:>7} {:>6} {:>6}",
        "#", "quadrant", "size", "x%", "y%", "color", "opacity", "delay", "dur"
    );
    for (i, orb) in orbs.iter().enumerate() {
        println!(
            "{:>3}  {:<12} {:>5} {:>8.2} {:>8.2}  {:<7} {:>7.3} {:>6.2} {:>6.2}",
            i,
            format!("{:?}", orb.quadrant),
            orb.size,
            orb.position.x,
            orb.position.y,
            orb.color.as_str(),
            orb.opacity,
            orb.delay_sec,
            orb.duration_sec
        );
    }
    Ok(())
}

/// Run due timers until `done` says stop, sleeping through the gaps unless
/// `fast` is set.
fn drive(sched: &ManualScheduler, fast: bool, mut done: impl FnMut() -> bool) {
    while !done() {
        let Some(due) = sched.next_due() else {
            break;
        };
        if !fast {
            thread::sleep(due.saturating_sub(sched.now()));
        }
        sched.advance_to(due);
    }
}

fn run_typewriter(machine: Typewriter, cycles: usize, fast: bool) -> anyhow::Result<()> {
    let sched = ManualScheduler::new();
    let cycler = TypewriterCycler::start(machine, sched.clone(), |tw| {
        let mut out = io::stdout().lock();
        let _ = write!(out, "\r\x1b[2K{}", tw.render());
        let _ = out.flush();
    });

    // One timer fires per check, so a check that follows a pause means that
    // phrase has started (or, if empty, finished) deleting.
    let mut prev = None;
    let mut completed = 0;
    drive(&sched, fast, || {
        if prev == Some(Phase::Paused) {
            completed += 1;
        }
        prev = Some(cycler.phase());
        completed >= cycles && cycler.text().is_empty()
    });
    cycler.dispose();
    println!();
    log::info!("[typewriter] {completed} phrases cycled");
    Ok(())
}

fn epoch_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

fn run_chat(message: String, fast: bool) -> anyhow::Result<()> {
    let sched = ManualScheduler::new();
    let printed = Rc::new(Cell::new(0usize));
    let printed_cb = printed.clone();
    let assistant = ChatAssistant::new(sched.clone(), epoch_ms, move |session| {
        for m in &session.messages()[printed_cb.get()..] {
            let who = match m.sender {
                Sender::User => "you",
                Sender::Assistant => "eunoia",
            };
            println!("{who:>7}: {}", m.text);
        }
        printed_cb.set(session.messages().len());
    });

    let settle = |assistant: &ChatAssistant<ManualScheduler>| {
        drive(&sched, fast, || !assistant.with(|s| s.is_typing()));
    };

    assistant.open();
    settle(&assistant);

    if !message.trim().is_empty() {
        if let Some(intent) = assistant.send(&message) {
            log::debug!("[chat] intent {intent:?}");
        }
        settle(&assistant);
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if assistant.send(&line).is_some() {
            settle(&assistant);
        }
    }
    log::info!("[chat] {} messages exchanged", printed.get());
    Ok(())
}

fn run_contact(form: ContactForm) -> anyhow::Result<()> {
    match form.validate() {
        Ok(()) => {
            let service = form
                .service()?
                .map(|s| s.label())
                .unwrap_or("no preference");
            println!("valid: {} <{}> ({service})", form.name.trim(), form.email.trim());
            Ok(())
        }
        Err(errors) => {
            for (field, message) in &errors {
                println!("{:>8}: {message}", field.id());
            }
            anyhow::bail!("{} invalid field(s)", errors.len())
        }
    }
}
