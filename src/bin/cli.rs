use clap::{Args, Parser, Subcommand};
use member_admin::{
    cli::{
        db::{db_generate, db_list, db_migrate, db_revert},
        member_type, menu, user,
    },
    core::db::init_pool,
    settings::get_config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// User related command
    User(UserArgs),
    /// Member type related command
    MemberType(MemberTypeArgs),
    /// Sidebar menu related command
    Menu(MenuArgs),
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
}

#[derive(Debug, Args)]
struct UserArgs {
    #[command(subcommand)]
    command: UserCommands,
}

#[derive(Debug, Subcommand)]
enum UserCommands {
    /// Create new user
    Create {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Debug, Args)]
struct MemberTypeArgs {
    #[command(subcommand)]
    command: MemberTypeCommands,
}

#[derive(Debug, Subcommand)]
enum MemberTypeCommands {
    /// Create new member type
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Debug, Args)]
struct MenuArgs {
    #[command(subcommand)]
    command: MenuCommands,
}

#[derive(Debug, Subcommand)]
enum MenuCommands {
    /// Create new sidebar menu entry
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        url: Option<String>,
        #[arg(short, long)]
        icon: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        order: i32,
        #[arg(short, long)]
        parent: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                let _ = dotenvy::dotenv();
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                println!("run migration on {}", config.database_url);
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                println!("{}", config.database_url);
                db_revert(&config).await?;
            }
        },
        Commands::User(user_args) => match &user_args.command {
            UserCommands::Create { username, email } => {
                println!("create user: {username:?}");
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                let new_user = user::create_user(&pool, username, email.clone()).await?;
                println!("user id: {}", new_user.id);
            }
        },
        Commands::MemberType(member_type_args) => match &member_type_args.command {
            MemberTypeCommands::Create { name, description } => {
                println!("create member type: {name:?}");
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                let new_member_type =
                    member_type::create_member_type(&pool, name, description.clone()).await?;
                println!("member type id: {}", new_member_type.id);
            }
        },
        Commands::Menu(menu_args) => match &menu_args.command {
            MenuCommands::Create {
                name,
                url,
                icon,
                order,
                parent,
            } => {
                println!("create menu: {name:?}");
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                let new_menu =
                    menu::create_menu(&pool, name, url.clone(), icon.clone(), *order, *parent)
                        .await?;
                println!("menu id: {}", new_menu.id);
            }
        },
    }
    Ok(())
}
