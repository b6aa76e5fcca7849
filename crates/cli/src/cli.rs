use clap::{Parser, Subcommand};

/// Parse a `NAME:LEVEL` skill flag; the level is optional.
fn parse_skill(s: &str) -> Result<(String, String), String> {
    let (name, level) = match s.rsplit_once(':') {
        Some((name, level)) => (name.trim(), level.trim()),
        None => (s.trim(), "intermediate"),
    };
    if name.is_empty() {
        return Err("skill name must not be empty".to_string());
    }
    Ok((name.to_string(), level.to_string()))
}

#[derive(Parser, Debug)]
#[command(name = "idealizador", version, about = "Idealizador projects and collaborators from the terminal")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Sign in and store the session locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Create an account
    Register {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        sobrenome: String,
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long = "confirm-password")]
        confirm_password: Option<String>,
        #[arg(long)]
        username: String,
        #[arg(long)]
        phone: String,
        /// Accept the terms of use
        #[arg(long = "accept-terms")]
        accept_terms: bool,
    },
    /// Show the signed-in user
    Whoami,
    /// List your projects
    Projects {
        /// Filter by title, description, category or tag
        #[arg(long)]
        search: Option<String>,
    },
    /// Search every registered collaborator
    Collaborators {
        #[arg(long)]
        search: String,
    },
    /// Create a project
    CreateProject {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        /// Required skill as NAME:LEVEL (beginner, intermediate, advanced); repeatable
        #[arg(long = "skill", value_parser = parse_skill)]
        skills: Vec<(String, String)>,
    },
    /// Show a project and work with its collaborators
    Project {
        id: String,
        /// Search collaborators to add
        #[arg(long)]
        search: Option<String>,
        /// Add the search result with this id (or e-mail) to the project
        #[arg(long, requires = "search")]
        add: Option<String>,
        /// Ask the suggestion service for missing profiles
        #[arg(long)]
        suggest: bool,
        /// Rank directory collaborators by the project's skills
        #[arg(long)]
        recommend: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_flag_defaults_level() {
        assert_eq!(
            parse_skill("Rust"),
            Ok(("Rust".to_string(), "intermediate".to_string()))
        );
        assert_eq!(
            parse_skill("Design UX:ADVANCED"),
            Ok(("Design UX".to_string(), "ADVANCED".to_string()))
        );
        assert!(parse_skill(":beginner").is_err());
    }

    #[test]
    fn project_add_requires_search() {
        assert!(Cli::try_parse_from(["idealizador", "project", "7", "--add", "3"]).is_err());
        let cli =
            Cli::try_parse_from(["idealizador", "project", "7", "--search", "ana", "--add", "3"])
                .unwrap();
        assert!(matches!(cli.command, Command::Project { add: Some(_), .. }));
    }
}
