use clap::Args;
use larder_app::{
    auth::{
        DEFAULT_ACCESS_TTL_SECONDS, DEFAULT_REFRESH_TTL_SECONDS, JwtSettings, Password,
        PgAuthService, Registration, TokenIssuer,
    },
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Secret the API signs tokens with
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    username: String,

    #[arg(long, env = "LARDER_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    /// Grant catalog and order administration
    #[arg(long)]
    staff: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let tokens = TokenIssuer::new(&JwtSettings {
        secret: args.jwt_secret,
        access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
        refresh_ttl_seconds: DEFAULT_REFRESH_TTL_SECONDS,
    })
    .map_err(|error| format!("invalid jwt settings: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool), tokens);

    let user = service
        .create_user(
            Registration {
                email: args.email,
                username: args.username,
                password: Password::new(args.password),
                first_name: args.first_name,
                last_name: args.last_name,
                phone: String::new(),
            },
            args.staff,
        )
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("is_staff: {}", user.is_staff);

    Ok(())
}
