use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idealizador_client::{
    controllers::{
        greeting, CollaboratorPanel, CreateProjectController, EnrolledState, HomeController,
        LoginController, LoginForm, Notice, Outcome, ProjectDetailController, ProjectForm,
        RegisterController, RegisterForm, SuggestionsPanel,
    },
    matching::NormalizedCollaborator,
    Config, Services,
};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idealizador=info,idealizador_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let services = Services::from_config(&config)?;
    tracing::debug!(state = %config.state_path, "configuration loaded");

    let ok = run(cli.command, services).await?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns `false` when the command ended on an error notice.
async fn run(command: Command, services: Services) -> anyhow::Result<bool> {
    match command {
        Command::Login { email, password } => {
            let outcome = LoginController::new(services)
                .submit(&LoginForm { email, password })
                .await;
            if outcome.redirect.is_some() && outcome.notice.is_none() {
                println!("Login realizado.");
            }
            Ok(report(&outcome))
        }
        Command::Logout => {
            let outcome = HomeController::new(services).logout();
            println!("Sessão encerrada.");
            Ok(report(&outcome))
        }
        Command::Register {
            nome,
            sobrenome,
            cpf,
            email,
            password,
            confirm_password,
            username,
            phone,
            accept_terms,
        } => {
            let form = RegisterForm {
                nome,
                sobrenome,
                cpf,
                email,
                confirmar_senha: confirm_password.unwrap_or_else(|| password.clone()),
                senha: password,
                nome_usuario: username,
                telefone: phone,
                aceitou_termos: accept_terms,
            };
            let outcome = RegisterController::new(services).submit(&form).await;
            Ok(report(&outcome))
        }
        Command::Whoami => {
            services.session.ensure_from_legacy();
            match greeting(&services.session) {
                Some(line) => {
                    println!("{line}");
                    Ok(true)
                }
                None => {
                    println!("Nenhuma sessão ativa.");
                    Ok(false)
                }
            }
        }
        Command::Projects { search } => {
            let mut home = HomeController::new(services);
            let outcome = home.load().await;
            if let Some(line) = home.greeting() {
                println!("{line}");
            }
            if !report(&outcome) || outcome.notice.is_some() {
                return Ok(!outcome.is_error());
            }
            for card in home.filter(search.as_deref().unwrap_or_default()) {
                let project = &card.project;
                let id = project.id.as_ref().map(ToString::to_string).unwrap_or_default();
                println!("[{id}] {}", project.title_or_default());
                println!("    {}", project.description_or_default());
                println!("    Categoria: {}", project.category_or_default());
                let tags = project.tag_names();
                if !tags.is_empty() {
                    println!("    Habilidades: {}", tags.join(", "));
                }
                match &card.collaborators {
                    EnrolledState::Loaded(members) => {
                        for member in members {
                            println!("      - {} ({})", member.name, member.skill_line());
                        }
                    }
                    failed => println!("      {}", failed.message().unwrap_or_default()),
                }
            }
            Ok(true)
        }
        Command::Collaborators { search } => {
            match HomeController::new(services).search_collaborators(&search).await {
                CollaboratorPanel::Hidden => Ok(true),
                CollaboratorPanel::Failed(message) => Ok(report(&Outcome::notice(Notice::error(message)))),
                panel @ CollaboratorPanel::Results { .. } => {
                    if let Some(message) = panel.empty_message() {
                        println!("{message}");
                    }
                    if let CollaboratorPanel::Results { items, .. } = &panel {
                        items.iter().for_each(print_collaborator);
                    }
                    Ok(true)
                }
            }
        }
        Command::CreateProject {
            title,
            description,
            category,
            skills,
        } => {
            let mut controller = CreateProjectController::new(services);
            for (name, level) in &skills {
                let outcome = controller.add_skill(name, level);
                report(&outcome);
            }
            let outcome = controller
                .submit(&ProjectForm {
                    title,
                    description,
                    category,
                })
                .await;
            Ok(report(&outcome))
        }
        Command::Project {
            id,
            search,
            add,
            suggest,
            recommend,
        } => run_project(services, &id, search, add, suggest, recommend).await,
    }
}

async fn run_project(
    services: Services,
    id: &str,
    search: Option<String>,
    add: Option<String>,
    suggest: bool,
    recommend: bool,
) -> anyhow::Result<bool> {
    let mut detail = ProjectDetailController::new(services);
    if !report(&detail.load(id).await) {
        return Ok(false);
    }

    if let Some(project) = detail.project() {
        println!("{}", project.title_or_default());
        println!("{}", project.description_or_default());
        println!("Categoria: {}", project.category_or_default());
    }
    println!("Inscritos: {}", detail.member_ids_summary());
    detail.members().iter().for_each(print_collaborator);

    if let Some(term) = search {
        if !report(&detail.search(&term).await) {
            return Ok(false);
        }
        if let Some(message) = detail.panel().empty_message() {
            println!("{message}");
        }
        detail.panel().items().iter().for_each(print_collaborator);

        if let Some(key) = add {
            let selected = detail.select(&key);
            if !report(&selected) || !detail.flow().can_submit() {
                return Ok(!selected.is_error());
            }
            if !report(&detail.submit().await) {
                return Ok(false);
            }
            println!("Inscritos: {}", detail.member_ids_summary());
        }
    }

    if recommend {
        for ranked in detail.recommend_candidates().await? {
            let skills: Vec<String> = ranked
                .matches
                .iter()
                .map(|m| format!("{} ({})", m.name, m.level.label()))
                .collect();
            println!(
                "{:>3}  {} <{}>  {}",
                ranked.score,
                ranked.collaborator.name,
                ranked.collaborator.email,
                skills.join(", ")
            );
        }
    }

    if suggest {
        match detail.generate_suggestions().await {
            SuggestionsPanel::Suggestions(items) => {
                for suggestion in items {
                    println!("* {}", suggestion.profile());
                    println!("  {}", suggestion.rationale());
                }
            }
            SuggestionsPanel::Empty => println!("Nenhuma sugestão retornada."),
            SuggestionsPanel::Failed(message) => {
                return Ok(report(&Outcome::notice(Notice::error(message))));
            }
        }
    }

    Ok(true)
}

fn print_collaborator(c: &NormalizedCollaborator) {
    let key = c.selection_key().unwrap_or_default();
    let marker = if c.in_project { "inscrito" } else { "não inscrito" };
    println!("  [{key}] {} <{}> {} ({marker})", c.name, c.email, c.skill_line());
}

/// Prints the outcome's notice; `false` for an error.
fn report(outcome: &Outcome) -> bool {
    if let Some(notice) = &outcome.notice {
        if notice.is_error() {
            eprintln!("{}", notice.message);
        } else {
            println!("{}", notice.message);
        }
    }
    !outcome.is_error()
}
