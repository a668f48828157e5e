use clap::{Parser, Subcommand};
use neuralcare_core::{
    ConditionCatalog, CoreConfig, DiagnosisEngine, Gender, NonEmptyText, PatientContext,
    ReferenceStore, SymptomCatalog, DISCLAIMER,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neuralcare")]
#[command(about = "NeuralCare symptom checker CLI")]
struct Cli {
    /// Directory holding the reference CSV tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Path to the classifier artifact (JSON)
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List known symptoms
    Symptoms {
        /// Only show symptoms containing this text
        #[arg(long)]
        filter: Option<String>,
        /// Sort alphabetically instead of by feature index
        #[arg(long)]
        sorted: bool,
    },
    /// List the conditions the model can predict
    Conditions,
    /// Predict a condition from symptoms
    Diagnose {
        /// Symptom identifiers, e.g. skin_rash
        #[arg(required = true)]
        symptoms: Vec<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// Male, Female or Other
        #[arg(long)]
        gender: Option<String>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Check that every condition has a row in every reference table
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neuralcare_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Symptoms { filter, sorted }) => {
            let catalog = SymptomCatalog::get();
            let mut ids = match filter.as_deref() {
                Some(q) => catalog.search(q),
                None => catalog.ids().to_vec(),
            };
            if sorted {
                ids.sort_unstable();
            }
            if ids.is_empty() {
                println!("No symptoms match.");
            }
            for id in ids {
                println!("{:<32} {}", id, SymptomCatalog::display_label(id));
            }
        }
        Some(Commands::Conditions) => {
            for (code, name) in ConditionCatalog::get().iter() {
                println!("{:>3}  {:?}", code.0, name);
            }
        }
        Some(Commands::Diagnose {
            symptoms,
            name,
            age,
            gender,
            height,
            weight,
        }) => {
            let patient = PatientContext {
                name: name.and_then(|n| NonEmptyText::new(n).ok()),
                age,
                gender: gender.map(|g| g.parse::<Gender>()).transpose()?,
                height_cm: height,
                weight_kg: weight,
            };
            patient.validate()?;

            let cfg = CoreConfig::resolve(cli.data_dir, cli.model)?;
            let engine = DiagnosisEngine::load(&cfg);

            match engine.diagnose(&patient, &symptoms) {
                Ok(diagnosis) => {
                    print_patient(&diagnosis.patient);
                    let rec = diagnosis.recommendation;
                    println!("Reported symptoms: {}", diagnosis.reported_symptoms.join(", "));
                    println!();
                    println!("Predicted condition: {}", rec.condition.trim_end());
                    println!();
                    println!("Description:\n  {}", rec.description);
                    print_list("Precautions", &rec.precautions);
                    print_list("Medications", &rec.medications);
                    print_list("Diet", &rec.diet);
                    print_list("Workout", &rec.workout);
                    println!();
                    println!("{}", DISCLAIMER);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    if let Some(hint) = e.user_hint() {
                        eprintln!("{}", hint);
                    }
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Check) => {
            let cfg = CoreConfig::resolve(cli.data_dir, cli.model)?;
            let report = ReferenceStore::load(cfg.data_dir()).consistency_report(ConditionCatalog::get());
            print!("{}", report);
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        None => {
            println!("Use 'neuralcare --help' for commands");
        }
    }

    Ok(())
}

fn print_patient(patient: &PatientContext) {
    if patient.is_empty() {
        return;
    }
    println!("Patient");
    if let Some(name) = &patient.name {
        println!("  Name:   {}", name);
    }
    if let Some(age) = patient.age {
        println!("  Age:    {}", age);
    }
    if let Some(gender) = patient.gender {
        println!("  Gender: {}", gender);
    }
    if let Some(bmi) = patient.bmi() {
        println!("  BMI:    {}", bmi);
    }
    println!();
}

fn print_list(title: &str, items: &[String]) {
    println!("{}:", title);
    for (i, item) in items.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}
