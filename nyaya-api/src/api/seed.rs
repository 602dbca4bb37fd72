//! Sample data loader for demos

use axum::{extract::State, http::StatusCode, Json};
use nyaya_common::db;
use nyaya_common::models::{NewCase, NewStudent, SeedSummary};
use tracing::info;

use crate::{ApiResult, AppState};

fn sample_students() -> Vec<NewStudent> {
    vec![
        NewStudent {
            name: "Rajesh Kumar".to_string(),
            email: "rajesh@college.edu".to_string(),
            college: "Delhi University Law College".to_string(),
            skills: vec!["Constitutional Law".to_string(), "Criminal Law".to_string()],
        },
        NewStudent {
            name: "Priya Singh".to_string(),
            email: "priya@college.edu".to_string(),
            college: "Mumbai Law School".to_string(),
            skills: vec!["Consumer Rights".to_string(), "Property Law".to_string()],
        },
    ]
}

fn sample_cases() -> Vec<NewCase> {
    vec![
        NewCase {
            title: "Property Dispute - Boundary Issue".to_string(),
            description: "Two neighbors in dispute over boundary line".to_string(),
            category: "property".to_string(),
        },
        NewCase {
            title: "Consumer Complaint - Defective Product".to_string(),
            description: "Customer received defective appliance".to_string(),
            category: "consumer".to_string(),
        },
    ]
}

/// POST /api/seed
///
/// Replaces all students and cases with the sample set.
pub async fn seed_data(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<SeedSummary>)> {
    db::clear_cases(&state.db).await?;
    db::clear_students(&state.db).await?;

    let students = sample_students();
    let cases = sample_cases();
    let summary = SeedSummary {
        message: "Sample data loaded successfully".to_string(),
        students: students.len(),
        cases: cases.len(),
    };

    for student in students {
        db::insert_student(&state.db, &student.into_student()).await?;
    }
    for case in cases {
        db::insert_case(&state.db, &case.into_case()).await?;
    }

    info!("✓ Seeded {} students and {} cases", summary.students, summary.cases);
    Ok((StatusCode::CREATED, Json(summary)))
}
