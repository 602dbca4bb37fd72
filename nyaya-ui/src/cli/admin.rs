//! admin portal commands

use anyhow::Result;

use super::{AdminCommand, CaseArgs, CaseCommand, Context, StudentArgs, StudentCommand};
use crate::forms::{CaseForm, StudentForm};
use crate::ClientError;

pub async fn run(ctx: &Context, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Students { command } => students(ctx, command).await,
        AdminCommand::Cases { command } => cases(ctx, command).await,
        AdminCommand::Seed => {
            let summary = ctx.client.seed().await?;
            println!(
                "{}",
                ctx.renderer.success(&format!(
                    "{} ({} students, {} cases)",
                    summary.message, summary.students, summary.cases
                ))
            );
            Ok(())
        }
    }
}

async fn students(ctx: &Context, command: StudentCommand) -> Result<()> {
    let client = &ctx.client;
    let renderer = &ctx.renderer;

    match command {
        StudentCommand::List => {
            print!("{}", renderer.students(&client.list_students().await?));
        }
        StudentCommand::Add(StudentArgs {
            name,
            email,
            college,
            skills,
        }) => {
            let form = StudentForm {
                name,
                email,
                college,
                skills,
            };
            let input = form.validate().map_err(ClientError::from)?;
            let student = client.create_student(&input).await?;
            println!(
                "{}",
                renderer.success(&format!("Registered {} ({})", student.name, student.id))
            );
        }
        StudentCommand::Remove { id } => {
            let response = client.delete_student(id).await?;
            println!("{}", renderer.success(&response.message));
        }
        StudentCommand::Cases { id } => {
            let students = client.list_students().await?;
            let cases = client.student_cases(id).await?;
            print!("{}", renderer.cases(&cases, &students));
        }
    }
    Ok(())
}

async fn cases(ctx: &Context, command: CaseCommand) -> Result<()> {
    let client = &ctx.client;
    let renderer = &ctx.renderer;

    match command {
        CaseCommand::List { status } => {
            let mut cases = client.list_cases().await?;
            if let Some(status) = status {
                cases.retain(|c| c.status == status);
            }
            let students = client.list_students().await?;
            print!("{}", renderer.cases(&cases, &students));
        }
        CaseCommand::Add(CaseArgs {
            title,
            description,
            category,
        }) => {
            let form = CaseForm {
                title,
                description,
                category,
            };
            let input = form.validate().map_err(ClientError::from)?;
            let case = client.create_case(&input).await?;
            println!(
                "{}",
                renderer.success(&format!("Created case {} ({})", case.title, case.id))
            );
        }
        CaseCommand::Assign {
            case_id,
            student_id,
        } => {
            let case = client.assign_case(case_id, student_id).await?;
            print!("{}", renderer.cases(&[case], &client.list_students().await?));
        }
        CaseCommand::Unassign { case_id } => {
            let case = client.unassign_case(case_id).await?;
            print!("{}", renderer.cases(&[case], &[]));
        }
        CaseCommand::Status { case_id, status } => {
            let case = client.set_case_status(case_id, status).await?;
            print!("{}", renderer.cases(&[case], &client.list_students().await?));
        }
        CaseCommand::Remove { case_id } => {
            let response = client.delete_case(case_id).await?;
            println!("{}", renderer.success(&response.message));
        }
    }
    Ok(())
}
