//! Web Form Routes
//!
//! Predict from the form, then optionally save the result to history. Saving
//! re-runs the prediction so the stored value always comes from the model.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use feature_engine::ApplicantInput;
use storage::HistoryRecord;
use tracing::error;

use crate::html::{error_list, escape, options, page};
use crate::{telemetry, ApiError, AppState, SharedState};

/// Countries offered by the form
pub const COUNTRIES: [&str; 12] = [
    "India",
    "USA",
    "UK",
    "Canada",
    "Australia",
    "Brazil",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "China",
    "Japan",
];

/// Visa types offered by the form
pub const VISA_TYPES: [&str; 4] = ["Tourist", "Student", "Work", "Business"];

const TITLE: &str = "Visa Processing Time Estimator";

fn default_input() -> ApplicantInput {
    ApplicantInput::new(COUNTRIES[0], VISA_TYPES[0], 1, 25, 2)
}

fn applicant_form(state: &AppState, values: &ApplicantInput) -> String {
    let bounds = state.validator.config();
    format!(
        r#"<form method="post" action="/form/predict">
<label>Applicant Country <select name="country">{countries}</select></label>
<label>Visa Type <select name="visa_type">{visas}</select></label>
<label>Application Month <input type="number" name="application_month" min="{month_min}" max="{month_max}" value="{month}" required></label>
<label>Applicant Age <input type="number" name="age" min="{age_min}" max="{age_max}" value="{age}" required></label>
<label>Number of Previous Travels <input type="number" name="travel_history_count" min="{travel_min}" max="{travel_max}" value="{travel}" required></label>
<p><button type="submit">Predict Processing Time</button></p>
</form>"#,
        countries = options(&COUNTRIES, &values.country),
        visas = options(&VISA_TYPES, &values.visa_type),
        month_min = bounds.month_range.0,
        month_max = bounds.month_range.1,
        month = values.application_month,
        age_min = bounds.age_range.0,
        age_max = bounds.age_range.1,
        age = values.age,
        travel_min = bounds.travel_history_range.0,
        travel_max = bounds.travel_history_range.1,
        travel = values.travel_history_count,
    )
}

fn save_form(input: &ApplicantInput) -> String {
    format!(
        r#"<form method="post" action="/form/save">
<input type="hidden" name="country" value="{country}">
<input type="hidden" name="visa_type" value="{visa_type}">
<input type="hidden" name="application_month" value="{month}">
<input type="hidden" name="age" value="{age}">
<input type="hidden" name="travel_history_count" value="{travel}">
<button type="submit">Save Prediction to History</button>
</form>"#,
        country = escape(&input.country),
        visa_type = escape(&input.visa_type),
        month = input.application_month,
        age = input.age,
        travel = input.travel_history_count,
    )
}

fn form_page(state: &AppState, values: &ApplicantInput, notice: &str) -> String {
    format!(
        "<h1>AI-Enabled Visa Processing Time Estimator</h1>\n\
         <p>Estimate visa processing time using a trained ML model</p>\n{}\n{}",
        applicant_form(state, values),
        notice,
    )
}

/// Empty form with default values
pub async fn index(State(state): State<SharedState>) -> Response {
    page(TITLE, &form_page(&state, &default_input(), "")).into_response()
}

/// Validate, predict and show the result with a save button
pub async fn predict(
    State(state): State<SharedState>,
    form: Result<Form<ApplicantInput>, FormRejection>,
) -> Response {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => return rejected_page(&state, rejection),
    };

    let validation = state.validator.validate(&input);
    if !validation.valid {
        let messages: Vec<String> = validation.errors.iter().map(ToString::to_string).collect();
        let body = form_page(&state, &input, &error_list(&messages));
        return (StatusCode::UNPROCESSABLE_ENTITY, page(TITLE, &body)).into_response();
    }

    match state.predict(&input, "form") {
        Ok(prediction) => {
            let notice = format!(
                r#"<p class="success">Estimated Visa Processing Time: {} days</p>{}"#,
                prediction.estimated_processing_days,
                save_form(&input),
            );
            page(TITLE, &form_page(&state, &input, &notice)).into_response()
        }
        Err(e) => failure_page(&state, &input, e),
    }
}

/// Re-run the prediction and append it to the persisted history
pub async fn save(
    State(state): State<SharedState>,
    form: Result<Form<ApplicantInput>, FormRejection>,
) -> Response {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => return rejected_page(&state, rejection),
    };

    let validation = state.validator.validate(&input);
    if !validation.valid {
        let messages: Vec<String> = validation.errors.iter().map(ToString::to_string).collect();
        let body = form_page(&state, &input, &error_list(&messages));
        return (StatusCode::UNPROCESSABLE_ENTITY, page(TITLE, &body)).into_response();
    }

    let prediction = match state.predict(&input, "form") {
        Ok(prediction) => prediction,
        Err(e) => return failure_page(&state, &input, e),
    };

    let record = HistoryRecord {
        country: input.country.clone(),
        visa_type: input.visa_type.clone(),
        application_month: input.application_month,
        age: input.age,
        travel_history_count: input.travel_history_count,
        predicted_processing_days: prediction.estimated_processing_days,
    };

    let saved = state.history.lock().await.save(record);
    match saved {
        Ok(()) => {
            telemetry::record_history_save();
            Redirect::to("/history").into_response()
        }
        Err(e) => {
            error!("Failed to persist history: {}", e);
            failure_page(&state, &input, ApiError::from(e))
        }
    }
}

fn failure_page(state: &AppState, input: &ApplicantInput, err: ApiError) -> Response {
    let notice = error_list(&[err.public_message().to_string()]);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        page(TITLE, &form_page(state, input, &notice)),
    )
        .into_response()
}

/// Form body that could not be parsed, re-rendered with defaults
fn rejected_page(state: &AppState, rejection: FormRejection) -> Response {
    let notice = error_list(&[format!("Invalid form input: {}", rejection.body_text())]);
    (
        rejection.status(),
        page(TITLE, &form_page(state, &default_input(), &notice)),
    )
        .into_response()
}
