#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};
use weekplan::{
    calendar, io,
    model::{Employee, WorkScheduleMode},
    notification::{self, MessageRenderer, TextMessages},
    preferences,
    scheduler::{GenerateOptions, Scheduler},
    storage::{JsonStorage, Storage},
};

/// CLI de planning hebdomadaire (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'espace de travail
    #[arg(long, global = true, default_value = "weekplan.json")]
    workspace: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un employé
    AddEmployee {
        #[arg(long)]
        name: String,
        /// `5/2`, `flexible` ou `fixed`
        #[arg(long, default_value = "flexible")]
        mode: String,
        #[arg(long, default_value_t = 5)]
        max_work_days: u8,
        /// Par défaut `7 - max_work_days`
        #[arg(long)]
        min_off_days: Option<u8>,
        /// Jours travaillés (mode `fixed`), ex. "0;2;4"
        #[arg(long)]
        work_days: Option<String>,
        /// Repos imposés (mode `flexible`), ex. "6"
        #[arg(long)]
        off_days: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Afficher et modifier les réglages de génération
    Settings {
        #[arg(long)]
        exact_per_day: Option<usize>,
        #[arg(long)]
        attempts: Option<u32>,
        #[arg(long)]
        auto_enabled: Option<bool>,
        /// 0 = lundi .. 6 = dimanche
        #[arg(long)]
        auto_day: Option<u8>,
        /// HH:MM
        #[arg(long)]
        auto_time: Option<String>,
    },

    /// Demander (ou retirer) un jour de repos
    Prefer {
        #[arg(long)]
        employee: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Retire le souhait au lieu de l'ajouter
        #[arg(long)]
        clear: bool,
        /// Ignore la fermeture de la saisie (administrateur)
        #[arg(long)]
        force: bool,
    },

    /// Signaler les jours où trop de repos sont demandés
    Conflicts {
        /// Une date de la semaine (YYYY-MM-DD), aujourd'hui par défaut
        #[arg(long)]
        week: Option<String>,
    },

    /// Générer le planning d'une semaine
    Generate {
        #[arg(long)]
        week: Option<String>,
        /// Graine pour un résultat reproductible
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher le planning d'une semaine
    Show {
        #[arg(long)]
        week: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Exporter le planning d'une semaine en CSV
    Export {
        #[arg(long)]
        week: Option<String>,
        /// Fichier CSV de sortie
        #[arg(long)]
        out: String,
    },

    /// Générer un message texte pour un employé
    Message {
        #[arg(long, value_enum)]
        kind: MessageKind,
        /// Obligatoire sauf pour `ready` et `reminders`
        #[arg(long)]
        employee: Option<String>,
        #[arg(long)]
        week: Option<String>,
        /// Jour travaillé visé par `reminders` (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Fichier de sortie (texte brut), sinon stdout
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MessageKind {
    Schedule,
    DaysOff,
    Ready,
    Reminders,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.workspace)?;
    let mut workspace = storage.load_or_default()?;
    let today = Local::now().date_naive();

    let code = match cli.cmd {
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            workspace.employees.extend(employees);
            storage.save(&workspace)?;
            0
        }
        Commands::AddEmployee {
            name,
            mode,
            max_work_days,
            min_off_days,
            work_days,
            off_days,
            color,
        } => {
            if workspace.find_employee_by_name(&name).is_some() {
                bail!("employee already exists: {name}");
            }
            let mode: WorkScheduleMode = mode.parse().map_err(anyhow::Error::msg)?;
            let mut employee = match mode {
                WorkScheduleMode::FixedFiveTwo => Employee::five_two(&name),
                WorkScheduleMode::FixedCustom => {
                    let raw = work_days.context("--work-days is required for a fixed schedule")?;
                    Employee::fixed_custom(&name, io::parse_days(&raw)?)
                }
                WorkScheduleMode::Flexible => {
                    let min_off = min_off_days.unwrap_or(7u8.saturating_sub(max_work_days));
                    let mut employee = Employee::flexible(&name).with_bounds(max_work_days, min_off);
                    if let Some(raw) = off_days {
                        employee.fixed_off_days = io::parse_days(&raw)?;
                    }
                    employee
                }
            };
            if let Some(color) = color {
                employee.color = color;
            }
            println!("{} | {} | {}", employee.id.as_str(), employee.name, mode.as_str());
            workspace.employees.push(employee);
            storage.save(&workspace)?;
            0
        }
        Commands::Settings {
            exact_per_day,
            attempts,
            auto_enabled,
            auto_day,
            auto_time,
        } => {
            let settings = &mut workspace.settings;
            let mut changed = false;
            if let Some(v) = exact_per_day {
                settings.exact_employees_per_day = v;
                changed = true;
            }
            if let Some(v) = attempts {
                settings.generation_attempts = v;
                changed = true;
            }
            if let Some(v) = auto_enabled {
                settings.auto_generation_enabled = v;
                changed = true;
            }
            if let Some(v) = auto_day {
                if v > 6 {
                    bail!("auto day must be within 0-6 (0 = Monday)");
                }
                settings.auto_generation_day = v;
                changed = true;
            }
            if let Some(v) = auto_time {
                chrono::NaiveTime::parse_from_str(&v, "%H:%M")
                    .with_context(|| format!("invalid time (expected HH:MM): {v}"))?;
                settings.auto_generation_time = v;
                changed = true;
            }
            println!(
                "exact_per_day={} attempts={} auto_enabled={} auto_day={} auto_time={}",
                settings.exact_employees_per_day,
                settings.generation_attempts,
                settings.auto_generation_enabled,
                settings.auto_generation_day,
                settings.auto_generation_time
            );
            if changed {
                storage.save(&workspace)?;
            }
            0
        }
        Commands::Prefer {
            employee,
            date,
            clear,
            force,
        } => {
            let date = calendar::parse_iso_date(&date)?;
            if !force {
                preferences::ensure_selection_open(&workspace.settings, today)?;
            }
            let id = workspace
                .find_employee_by_name(&employee)
                .map(|e| e.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown employee: {}", employee))?;
            let pref = preferences::set_preference(
                &workspace.employees,
                &mut workspace.preferences,
                &id,
                date,
                !clear,
            )?;
            println!("{} | {} | off={}", employee, pref.date, pref.is_preferred);
            storage.save(&workspace)?;
            0
        }
        Commands::Conflicts { week } => {
            let week = resolve_week(week.as_deref(), today)?;
            let scheduler = Scheduler::new(
                &workspace.employees,
                &workspace.preferences,
                &workspace.settings,
            );
            let conflicts = scheduler.detect_conflicts(&week);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                for (date, names) in &conflicts {
                    if names.is_empty() {
                        println!("{date} | not enough flexible employees");
                    } else {
                        println!("{date} | {}", names.join(", "));
                    }
                }
                eprintln!("Found {} conflicting day(s)", conflicts.len());
                // Code 2 = WARNING
                2
            }
        }
        Commands::Generate { week, seed } => {
            let week = resolve_week(week.as_deref(), today)?;
            let outcome = Scheduler::new(
                &workspace.employees,
                &workspace.preferences,
                &workspace.settings,
            )
            .generate(&week, GenerateOptions { seed });
            println!(
                "score={} attempts={} entries={}",
                outcome.score,
                outcome.attempts_run,
                outcome.entries.len()
            );
            workspace.merge_week(outcome.entries, &week);
            storage.save(&workspace)?;
            0
        }
        Commands::Show { week, out_csv } => {
            let week = resolve_week(week.as_deref(), today)?;
            if let Some(path) = out_csv {
                io::export_week_csv(path, &workspace, &week)?;
            }
            let dates = calendar::iso_week_strings(&week);
            let header: Vec<&str> = dates.iter().map(|d| &d[5..]).collect();
            println!("{:<16} {}", "", header.join(" "));
            for employee in &workspace.employees {
                let row: Vec<String> = dates
                    .iter()
                    .map(|date| {
                        workspace
                            .schedule
                            .iter()
                            .find(|e| e.employee_id == employee.id && &e.date == date)
                            .map_or_else(|| "  -  ".to_string(), |e| format!("{:^5}", e.status.code()))
                    })
                    .collect();
                println!("{:<16} {}", employee.name, row.join(" "));
            }
            0
        }
        Commands::Export { week, out } => {
            let week = resolve_week(week.as_deref(), today)?;
            io::export_week_csv(&out, &workspace, &week)?;
            println!("exported {} entries to {out}", workspace.week_entries(&week).len());
            0
        }
        Commands::Message {
            kind,
            employee,
            week,
            date,
            out,
        } => {
            let week = resolve_week(week.as_deref(), today)?;
            let renderer = TextMessages;
            let content = match kind {
                MessageKind::Schedule => {
                    let name = employee.context("--employee is required")?;
                    notification::prepare_schedule_message(&workspace, &name, &week, &renderer)?
                        .content
                }
                MessageKind::DaysOff => {
                    let name = employee.context("--employee is required")?;
                    notification::prepare_days_off_message(&workspace, &name, &week, &renderer)?
                        .content
                }
                MessageKind::Ready => renderer.schedule_ready(&week),
                MessageKind::Reminders => {
                    let date = match date {
                        Some(raw) => calendar::parse_iso_date(&raw)?,
                        None => today.succ_opt().context("date overflow")?,
                    };
                    notification::prepare_work_day_reminders(&workspace, date, &renderer)
                        .into_iter()
                        .map(|m| format!("[{}]\n{}", m.employee_name, m.content))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            };
            match out {
                Some(path) => std::fs::write(&path, content)?,
                None => print!("{content}"),
            }
            0
        }
    };

    std::process::exit(code);
}

fn resolve_week(raw: Option<&str>, today: NaiveDate) -> Result<[NaiveDate; 7]> {
    match raw {
        Some(raw) => Ok(calendar::week_of(raw)?),
        None => Ok(calendar::week_dates(today)),
    }
}
