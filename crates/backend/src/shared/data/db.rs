use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the SQLite database and bootstrap the schema.
/// Must be called once at startup, before any repository call.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/grupoea.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("database already initialized"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN.get().expect("database not initialized")
}

/// Minimal schema bootstrap: every aggregate table is created when missing.
/// Existing databases are left untouched.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    const TABLES: &[(&str, &str)] = &[
        (
            "a001_project",
            r#"
            CREATE TABLE IF NOT EXISTS a001_project (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                client_name TEXT NOT NULL DEFAULT '',
                site_address TEXT NOT NULL DEFAULT '',
                start_date TEXT,
                retention_rate REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT '',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a002_supplier",
            r#"
            CREATE TABLE IF NOT EXISTS a002_supplier (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                legal_name TEXT NOT NULL DEFAULT '',
                cif TEXT NOT NULL DEFAULT '',
                contact_email TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                payment_terms_days INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT '',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a003_machinery",
            r#"
            CREATE TABLE IF NOT EXISTS a003_machinery (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                supplier_id TEXT,
                category TEXT NOT NULL DEFAULT '',
                plate_or_serial TEXT NOT NULL DEFAULT '',
                monthly_rental_cost REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT '',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a004_fleet_vehicle",
            r#"
            CREATE TABLE IF NOT EXISTS a004_fleet_vehicle (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                plate TEXT NOT NULL DEFAULT '',
                brand TEXT NOT NULL DEFAULT '',
                model TEXT NOT NULL DEFAULT '',
                itv_due TEXT,
                assigned_worker_id TEXT,
                status TEXT NOT NULL DEFAULT '',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a005_certification",
            r#"
            CREATE TABLE IF NOT EXISTS a005_certification (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                project_id TEXT NOT NULL,
                issue_date TEXT NOT NULL,
                base_amount REAL NOT NULL DEFAULT 0,
                iva_rate REAL NOT NULL DEFAULT 0,
                retention_rate REAL NOT NULL DEFAULT 0,
                iva_amount REAL NOT NULL DEFAULT 0,
                retention_amount REAL NOT NULL DEFAULT 0,
                net_amount REAL NOT NULL DEFAULT 0,
                accumulated_amount REAL NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a006_supplier_contract",
            r#"
            CREATE TABLE IF NOT EXISTS a006_supplier_contract (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                supplier_id TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT,
                monthly_amount REAL NOT NULL DEFAULT 0,
                signed INTEGER NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a007_supplier_invoice",
            r#"
            CREATE TABLE IF NOT EXISTS a007_supplier_invoice (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                supplier_id TEXT NOT NULL,
                invoice_number TEXT NOT NULL DEFAULT '',
                issue_date TEXT NOT NULL,
                base_amount REAL NOT NULL DEFAULT 0,
                iva_rate REAL NOT NULL DEFAULT 0,
                iva_amount REAL NOT NULL DEFAULT 0,
                total_amount REAL NOT NULL DEFAULT 0,
                paid INTEGER NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a008_supplier_payment",
            r#"
            CREATE TABLE IF NOT EXISTS a008_supplier_payment (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                supplier_id TEXT NOT NULL,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                amount REAL NOT NULL DEFAULT 0,
                payment_date TEXT,
                method TEXT NOT NULL DEFAULT '',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a009_incident",
            r#"
            CREATE TABLE IF NOT EXISTS a009_incident (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                vehicle_id TEXT,
                machinery_id TEXT,
                date TEXT NOT NULL,
                severity TEXT NOT NULL DEFAULT '',
                resolved INTEGER NOT NULL DEFAULT 0,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
        (
            "a010_worker",
            r#"
            CREATE TABLE IF NOT EXISTS a010_worker (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                dni TEXT NOT NULL DEFAULT '',
                trade TEXT NOT NULL DEFAULT '',
                hourly_cost REAL NOT NULL DEFAULT 0,
                irpf_rate REAL NOT NULL DEFAULT 0,
                active INTEGER NOT NULL DEFAULT 1,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        ),
    ];

    for (name, ddl) in TABLES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
        tracing::debug!("schema checked: {}", name);
    }

    // Dashboard queries filter by issue date and project constantly
    const INDEXES: &[&str] = &[
        "CREATE INDEX IF NOT EXISTS idx_a005_project_date ON a005_certification (project_id, issue_date);",
        "CREATE INDEX IF NOT EXISTS idx_a007_issue_date ON a007_supplier_invoice (issue_date);",
        "CREATE INDEX IF NOT EXISTS idx_a008_period ON a008_supplier_payment (year, month);",
    ];
    for ddl in INDEXES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }

    Ok(())
}
