use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub const VIEW_NAME: &str = "site_equipment_requirements_tasks_v";

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sites (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            client_name TEXT NOT NULL,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS equipment (
            id                   TEXT PRIMARY KEY,
            asset_tag            TEXT NOT NULL,
            description          TEXT NOT NULL DEFAULT '',
            equipment_site_id    TEXT NOT NULL,
            sap_equipment_number TEXT,
            functional_loc       TEXT,
            location_description TEXT,
            equipment_type       TEXT,
            equipment_subtype    TEXT,
            process_unit         TEXT,
            area_location        TEXT,
            regulation_name      TEXT,
            is_active            INTEGER NOT NULL DEFAULT 1,
            created_at           TEXT NOT NULL,
            FOREIGN KEY (equipment_site_id) REFERENCES sites(id)
        );

        CREATE TABLE IF NOT EXISTS requirements (
            id                  TEXT PRIMARY KEY,
            citation            TEXT NOT NULL,
            regulation_name     TEXT,
            requirement_summary TEXT NOT NULL,
            requirement_text    TEXT,
            site_id             TEXT NOT NULL,
            is_active           INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY (site_id) REFERENCES sites(id)
        );

        CREATE TABLE IF NOT EXISTS equipment_requirements (
            id                TEXT PRIMARY KEY,
            equipment_id      TEXT NOT NULL,
            requirement_id    TEXT NOT NULL,
            applicability     TEXT NOT NULL,
            pollutant         TEXT,
            notes             TEXT,
            mapped_by_user_id TEXT,
            mapped_at         TEXT,
            UNIQUE (equipment_id, requirement_id),
            FOREIGN KEY (equipment_id) REFERENCES equipment(id),
            FOREIGN KEY (requirement_id) REFERENCES requirements(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS task_templates (
            id               TEXT PRIMARY KEY,
            requirement_id   TEXT NOT NULL,
            task_name        TEXT NOT NULL,
            task_description TEXT NOT NULL DEFAULT '',
            frequency        TEXT NOT NULL,
            active           INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY (requirement_id) REFERENCES requirements(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id                  TEXT PRIMARY KEY,
            task_template_id    TEXT NOT NULL,
            equipment_id        TEXT NOT NULL,
            due_date            TEXT NOT NULL,
            status              TEXT NOT NULL,
            assigned_to_user_id TEXT,
            submitted_at        TEXT,
            approved_by_user_id TEXT,
            rejection_reason    TEXT,
            created_at          TEXT NOT NULL,
            FOREIGN KEY (task_template_id) REFERENCES task_templates(id) ON DELETE CASCADE,
            FOREIGN KEY (equipment_id) REFERENCES equipment(id)
        );

        CREATE TABLE IF NOT EXISTS users (
            id         TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            email      TEXT NOT NULL,
            role       TEXT NOT NULL,
            site_id    TEXT,
            is_active  INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            FOREIGN KEY (site_id) REFERENCES sites(id)
        );

        CREATE INDEX IF NOT EXISTS idx_equipment_site
            ON equipment(equipment_site_id);

        CREATE INDEX IF NOT EXISTS idx_tasks_equipment_template
            ON tasks(equipment_id, task_template_id);

        CREATE VIEW IF NOT EXISTS site_equipment_requirements_tasks_v AS
        SELECT
            s.id                  AS site_id,
            s.name                AS site_name,
            s.client_name         AS client_name,
            e.id                  AS equipment_id,
            e.asset_tag           AS asset_tag,
            e.description         AS equipment_description,
            e.equipment_site_id   AS equipment_site_id,
            r.id                  AS requirement_id,
            r.citation            AS citation,
            r.requirement_summary AS requirement_summary,
            t.id                  AS task_id,
            t.task_template_id    AS task_template_id,
            tt.task_name          AS task_name,
            t.status              AS task_status,
            t.due_date            AS due_date,
            t.assigned_to_user_id AS assigned_to_user_id
        FROM equipment_requirements er
        JOIN equipment e ON e.id = er.equipment_id
        JOIN sites s ON s.id = e.equipment_site_id
        JOIN requirements r ON r.id = er.requirement_id
        LEFT JOIN tasks t
            ON t.equipment_id = e.id
           AND t.task_template_id IN (
                SELECT id FROM task_templates WHERE requirement_id = r.id
           )
        LEFT JOIN task_templates tt ON tt.id = t.task_template_id;
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
