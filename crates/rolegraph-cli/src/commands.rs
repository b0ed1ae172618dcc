//! Subcommands and their execution against a catalog file

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::{Subcommand, ValueEnum};
use rolegraph_ast::{
    AlterRoleRenameStmt, AlterUserRenameStmt, CreateRoleStmt, CreateSchemaStmt, CreateTableStmt,
    CreateUserStmt, DropRoleStmt, DropSchemaStmt, DropTableStmt, DropUserStmt, GrantRoleStmt, GrantStmt,
    ObjectType, PrivilegeType, RevokeRoleStmt, RevokeStmt, Statement,
};
use rolegraph_catalog::Privileges;
use rolegraph_executor::{PrivilegeChecker, StatementExecutor};
use rolegraph_storage::{Database, DatabaseConfig};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a new catalog file, optionally with a first admin user
    Init {
        /// Admin user to create
        #[arg(long)]
        admin: Option<String>,
        #[arg(long, requires = "admin")]
        password: Option<String>,
        /// Overwrite an existing catalog file
        #[arg(long)]
        force: bool,
    },
    CreateRole {
        name: String,
        #[arg(long)]
        if_not_exists: bool,
    },
    /// Drop a role, revoking every right that references it
    DropRole {
        name: String,
        #[arg(long)]
        if_exists: bool,
    },
    RenameRole { name: String, new_name: String },
    CreateUser {
        name: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        if_not_exists: bool,
    },
    DropUser {
        name: String,
        #[arg(long)]
        if_exists: bool,
    },
    RenameUser { name: String, new_name: String },
    CreateSchema { name: String },
    DropSchema {
        name: String,
        #[arg(long)]
        if_exists: bool,
    },
    /// Register a table (schema.table or table) so rights can target it
    CreateTable { name: String },
    DropTable {
        name: String,
        #[arg(long)]
        if_exists: bool,
    },
    /// Grant privileges on a table or schema; without --on, on the database
    Grant {
        #[arg(value_delimiter = ',', required = true)]
        privileges: Vec<PrivilegeArg>,
        #[arg(long)]
        on: Option<String>,
        /// Treat --on as a schema name
        #[arg(long, requires = "on")]
        schema: bool,
        #[arg(long, value_delimiter = ',', required = true)]
        to: Vec<String>,
    },
    Revoke {
        #[arg(value_delimiter = ',', required = true)]
        privileges: Vec<PrivilegeArg>,
        #[arg(long)]
        on: Option<String>,
        #[arg(long, requires = "on")]
        schema: bool,
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<String>,
    },
    GrantRole {
        #[arg(value_delimiter = ',', required = true)]
        roles: Vec<String>,
        #[arg(long, value_delimiter = ',', required = true)]
        to: Vec<String>,
    },
    RevokeRole {
        #[arg(value_delimiter = ',', required = true)]
        roles: Vec<String>,
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<String>,
    },
    /// Report whether a grantee holds privileges on a table
    Check {
        grantee: String,
        #[arg(value_delimiter = ',', required = true)]
        privileges: Vec<PrivilegeArg>,
        #[arg(long)]
        on: String,
    },
    /// List users, roles and grants
    List,
    /// Print the catalog as a SQL script, or write it to a file
    Script {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeArg {
    Select,
    Insert,
    Update,
    Delete,
    All,
    AlterAnySchema,
}

impl From<PrivilegeArg> for PrivilegeType {
    fn from(arg: PrivilegeArg) -> Self {
        match arg {
            PrivilegeArg::Select => PrivilegeType::Select,
            PrivilegeArg::Insert => PrivilegeType::Insert,
            PrivilegeArg::Update => PrivilegeType::Update,
            PrivilegeArg::Delete => PrivilegeType::Delete,
            PrivilegeArg::All => PrivilegeType::AllPrivileges,
            PrivilegeArg::AlterAnySchema => PrivilegeType::AlterAnySchema,
        }
    }
}

/// Where the catalog lives and how to open it
#[derive(Debug, Clone)]
pub struct Context {
    pub catalog_path: PathBuf,
    pub database: DatabaseConfig,
}

fn object_type(on: &Option<String>, schema: bool) -> ObjectType {
    match (on, schema) {
        (None, _) => ObjectType::Database,
        (Some(_), true) => ObjectType::Schema,
        (Some(_), false) => ObjectType::Table,
    }
}

impl Command {
    /// The statement this command runs, if it is a DDL command
    pub fn to_statement(&self) -> Option<Statement> {
        let stmt = match self {
            Command::CreateRole { name, if_not_exists } => Statement::CreateRole(CreateRoleStmt {
                role_name: name.clone(),
                if_not_exists: *if_not_exists,
            }),
            Command::DropRole { name, if_exists } => {
                Statement::DropRole(DropRoleStmt { role_name: name.clone(), if_exists: *if_exists })
            }
            Command::RenameRole { name, new_name } => Statement::AlterRoleRename(AlterRoleRenameStmt {
                role_name: name.clone(),
                new_name: new_name.clone(),
            }),
            Command::CreateUser { name, password, admin, if_not_exists } => {
                Statement::CreateUser(CreateUserStmt {
                    user_name: name.clone(),
                    password: password.clone(),
                    admin: *admin,
                    if_not_exists: *if_not_exists,
                })
            }
            Command::DropUser { name, if_exists } => {
                Statement::DropUser(DropUserStmt { user_name: name.clone(), if_exists: *if_exists })
            }
            Command::RenameUser { name, new_name } => Statement::AlterUserRename(AlterUserRenameStmt {
                user_name: name.clone(),
                new_name: new_name.clone(),
            }),
            Command::CreateSchema { name } => {
                Statement::CreateSchema(CreateSchemaStmt { schema_name: name.clone() })
            }
            Command::DropSchema { name, if_exists } => {
                Statement::DropSchema(DropSchemaStmt { schema_name: name.clone(), if_exists: *if_exists })
            }
            Command::CreateTable { name } => Statement::CreateTable(CreateTableStmt { table_name: name.clone() }),
            Command::DropTable { name, if_exists } => {
                Statement::DropTable(DropTableStmt { table_name: name.clone(), if_exists: *if_exists })
            }
            Command::Grant { privileges, on, schema, to } => Statement::Grant(GrantStmt {
                privileges: privileges.iter().map(|&p| p.into()).collect(),
                object_type: object_type(on, *schema),
                object_name: on.clone().unwrap_or_default(),
                grantees: to.clone(),
            }),
            Command::Revoke { privileges, on, schema, from } => Statement::Revoke(RevokeStmt {
                privileges: privileges.iter().map(|&p| p.into()).collect(),
                object_type: object_type(on, *schema),
                object_name: on.clone().unwrap_or_default(),
                grantees: from.clone(),
            }),
            Command::GrantRole { roles, to } => {
                Statement::GrantRole(GrantRoleStmt { roles: roles.clone(), grantees: to.clone() })
            }
            Command::RevokeRole { roles, from } => {
                Statement::RevokeRole(RevokeRoleStmt { roles: roles.clone(), grantees: from.clone() })
            }
            Command::Init { .. } | Command::Check { .. } | Command::List | Command::Script { .. } => {
                return None
            }
        };
        Some(stmt)
    }
}

/// Run `command` and return the lines to print.
pub fn run(command: &Command, ctx: &Context) -> anyhow::Result<Vec<String>> {
    if let Some(stmt) = command.to_statement() {
        let mut db = open(ctx)?;
        let status = StatementExecutor::execute(&stmt, &mut db)?;
        db.save_json(&ctx.catalog_path)
            .with_context(|| format!("Failed to save catalog {}", ctx.catalog_path.display()))?;
        return Ok(vec![status]);
    }

    match command {
        Command::Init { admin, password, force } => init(ctx, admin.as_deref(), password.clone(), *force),
        Command::Check { grantee, privileges, on } => {
            let db = open(ctx)?;
            let mask = privilege_mask(privileges)?;
            let held = PrivilegeChecker::has_table_privilege(&db, grantee, on, mask)?;
            let verdict = if held { "holds" } else { "lacks" };
            Ok(vec![format!("{} {} {} on {}", grantee, verdict, mask, on)])
        }
        Command::List => list(&open(ctx)?),
        Command::Script { output: Some(path) } => {
            open(ctx)?.save_sql_script(path)?;
            Ok(vec![format!("Script written to {}", path.display())])
        }
        Command::Script { output: None } => Ok(open(ctx)?.sql_script()?),
        _ => bail!("unhandled command {:?}", command),
    }
}

fn open(ctx: &Context) -> anyhow::Result<Database> {
    let path = &ctx.catalog_path;
    if !path.exists() {
        bail!("Catalog {} does not exist; run `rolegraph init` first", path.display());
    }
    let mut db = Database::load_json(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;

    // The file decides identifier case; the config only decides who we are
    if ctx.database.security_enabled {
        db.enable_security();
    }
    db.set_current_user(ctx.database.current_user.clone());
    tracing::debug!("Opened catalog {} as {:?}", path.display(), db.current_user());
    Ok(db)
}

fn init(ctx: &Context, admin: Option<&str>, password: Option<String>, force: bool) -> anyhow::Result<Vec<String>> {
    if ctx.catalog_path.exists() && !force {
        bail!("Catalog {} already exists (use --force to overwrite)", ctx.catalog_path.display());
    }

    let mut db = Database::with_config(&DatabaseConfig { security_enabled: false, ..ctx.database.clone() });
    let mut lines = Vec::new();
    if let Some(name) = admin {
        let stmt = Statement::CreateUser(CreateUserStmt {
            user_name: name.to_string(),
            password,
            admin: true,
            if_not_exists: false,
        });
        lines.push(StatementExecutor::execute(&stmt, &mut db)?);
    }
    write_catalog(&db, &ctx.catalog_path)?;
    lines.push(format!("Initialized catalog {}", ctx.catalog_path.display()));
    Ok(lines)
}

fn write_catalog(db: &Database, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    db.save_json(path).with_context(|| format!("Failed to save catalog {}", path.display()))
}

fn privilege_mask(privileges: &[PrivilegeArg]) -> anyhow::Result<Privileges> {
    let mut mask = Privileges::empty();
    for privilege in privileges {
        mask |= match privilege {
            PrivilegeArg::Select => Privileges::SELECT,
            PrivilegeArg::Insert => Privileges::INSERT,
            PrivilegeArg::Update => Privileges::UPDATE,
            PrivilegeArg::Delete => Privileges::DELETE,
            PrivilegeArg::All => Privileges::ALL,
            PrivilegeArg::AlterAnySchema => bail!("alter-any-schema is not a table privilege"),
        };
    }
    Ok(mask)
}

fn list(db: &Database) -> anyhow::Result<Vec<String>> {
    let mut lines = vec!["Users:".to_string()];
    for user in db.catalog.all_users() {
        let flag = if user.is_admin() { " (admin)" } else { "" };
        lines.push(format!("  {}{}", user.name(), flag));
    }
    lines.push("Roles:".to_string());
    for role in db.catalog.all_roles() {
        let flag = if role.is_system_role() { " (system)" } else { "" };
        lines.push(format!("  {}{}", role.name(), flag));
    }
    lines.push("Grants:".to_string());
    for right in db.catalog.all_rights() {
        lines.push(format!("  {}", db.catalog.right_create_sql(right)?));
    }
    Ok(lines)
}
