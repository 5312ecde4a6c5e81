//! Terminal intake flow: prompt for each applicant field, confirm, submit,
//! and print the decision. Shares the screening service with the HTTP front
//! end so the two can never drift apart.

use std::io;
use std::sync::Arc;

use applicant_intake::config::AlloyConfig;
use applicant_intake::error::AppError;
use applicant_intake::workflows::screening::{
    validation, AlloyClient, ApplicantRecord, DecisionError, EvaluationReceipt, ScreeningError,
    ScreeningService,
};
use chrono::Local;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

pub(crate) async fn run_apply() -> Result<(), AppError> {
    let config = AlloyConfig::from_env()?;
    let service = ScreeningService::new(Arc::new(AlloyClient::new(&config)));

    println!("Applicant screening against {}", config.base_url);
    if let Err(error) = service.preflight().await {
        print_decision_failure(&error);
        return Ok(());
    }
    println!("Connected to the decision workflow.");
    println!();

    let theme = ColorfulTheme::default();
    let record = collect_record(&theme)?;

    println!();
    let proceed = Confirm::with_theme(&theme)
        .with_prompt("Submit this application for evaluation?")
        .default(true)
        .interact()
        .map_err(prompt_failed)?;
    if !proceed {
        println!("Submission cancelled.");
        return Ok(());
    }

    match service.evaluate(&record).await {
        Ok(receipt) => print_receipt(&receipt),
        Err(ScreeningError::Rejected(errors)) => {
            println!("The application did not pass validation:");
            for error in errors {
                println!("  - {error}");
            }
        }
        Err(ScreeningError::Decision(error)) => print_decision_failure(&error),
    }

    Ok(())
}

/// Credentials and connectivity check without collecting any applicant data.
pub(crate) async fn run_check() -> Result<(), AppError> {
    let config = AlloyConfig::from_env()?;
    let service = ScreeningService::new(Arc::new(AlloyClient::new(&config)));

    println!("Checking sandbox connectivity: {}", config.base_url);
    match service.preflight().await {
        Ok(parameters) => {
            println!("Credentials accepted.");
            match parameters.get("required") {
                Some(required) => println!("Required workflow attributes: {required}"),
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(&parameters).unwrap_or_default()
                ),
            }
        }
        Err(error) => print_decision_failure(&error),
    }

    Ok(())
}

fn collect_record(theme: &ColorfulTheme) -> Result<ApplicantRecord, AppError> {
    let today = Local::now().date_naive();

    let name_first: String = Input::with_theme(theme)
        .with_prompt("First name")
        .validate_with(require("First name is required."))
        .interact_text()
        .map_err(prompt_failed)?;

    let name_last: String = Input::with_theme(theme)
        .with_prompt("Last name")
        .validate_with(require("Last name is required."))
        .interact_text()
        .map_err(prompt_failed)?;

    let birth_date: String = Input::with_theme(theme)
        .with_prompt("Date of birth (YYYY-MM-DD)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if validation::valid_birth_date(input, today) {
                Ok(())
            } else {
                Err("DOB must be YYYY-MM-DD and age between 18–120.")
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let ssn: String = Input::with_theme(theme)
        .with_prompt("Social Security Number")
        .validate_with(|input: &String| -> Result<(), &str> {
            if validation::valid_ssn(input) {
                Ok(())
            } else {
                Err("SSN must be exactly 9 digits (numbers only).")
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let email: String = Input::with_theme(theme)
        .with_prompt("Email address")
        .validate_with(|input: &String| -> Result<(), &str> {
            if validation::valid_email(input) {
                Ok(())
            } else {
                Err("Email must look like name@example.com.")
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let address_line1: String = Input::with_theme(theme)
        .with_prompt("Address line 1")
        .validate_with(require("Address Line 1 is required."))
        .interact_text()
        .map_err(prompt_failed)?;

    let address_line2: String = Input::with_theme(theme)
        .with_prompt("Address line 2 (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_failed)?;

    let address_city: String = Input::with_theme(theme)
        .with_prompt("City")
        .validate_with(require("City is required."))
        .interact_text()
        .map_err(prompt_failed)?;

    let address_state: String = Input::with_theme(theme)
        .with_prompt("State (2-letter code)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if validation::valid_state(input) {
                Ok(())
            } else {
                Err("State must be a valid 2-letter US code (e.g., NY, CA).")
            }
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let address_postal_code: String = Input::with_theme(theme)
        .with_prompt("Zip/Postal code")
        .validate_with(require("Zip/Postal Code is required."))
        .interact_text()
        .map_err(prompt_failed)?;

    Ok(ApplicantRecord {
        name_first,
        name_last,
        birth_date,
        ssn,
        email,
        address_line1,
        address_line2: (!address_line2.trim().is_empty()).then_some(address_line2),
        address_city,
        address_state,
        address_postal_code,
    })
}

fn require(message: &'static str) -> impl Fn(&String) -> Result<(), &'static str> {
    move |input: &String| {
        if input.trim().is_empty() {
            Err(message)
        } else {
            Ok(())
        }
    }
}

fn print_receipt(receipt: &EvaluationReceipt) {
    println!();
    println!("Decision: {}", receipt.decision.label);
    println!("{}", receipt.decision.message);
    if let Some(token) = &receipt.evaluation_token {
        println!("Evaluation token: {token}");
    }
    if let Ok(summary) = serde_json::to_string_pretty(&receipt.summary) {
        println!("Summary:");
        println!("{summary}");
    }
}

/// Same friendly texts the HTTP error mapping uses, printed instead of served.
fn print_decision_failure(error: &DecisionError) {
    match error {
        DecisionError::Timeout => println!("Request to Alloy timed out. Try again."),
        DecisionError::Connection(_) => {
            println!("Could not connect to Alloy API. Check internet.")
        }
        DecisionError::Transport(detail) => println!("Request failed: {detail}"),
        DecisionError::Upstream { status, body } => {
            println!("Alloy returned HTTP {status}:");
            match serde_json::from_str::<serde_json::Value>(body) {
                Ok(detail) => println!(
                    "{}",
                    serde_json::to_string_pretty(&detail).unwrap_or_default()
                ),
                Err(_) => println!("{body}"),
            }
        }
        DecisionError::MalformedResponse { body, .. } => {
            println!("Non-JSON response from Alloy.");
            println!("{body}");
        }
    }
}

fn prompt_failed(error: dialoguer::Error) -> AppError {
    AppError::Io(io::Error::other(error))
}
