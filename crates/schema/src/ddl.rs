//! DDL templates for the five per-tenant objects named in `spec.md` §4.4.
//!
//! Every statement here is `CREATE ... IF NOT EXISTS` / `CREATE OR REPLACE`,
//! so re-running [`crate::provision`] after a crash between T1 and T3 is safe
//! (`spec.md` §4.8, crash recovery via the `-1` shard sentinel). `suffix` is
//! the only interpolated segment; callers must run it through
//! `vql_shard::validate_suffix` before it reaches here.

pub fn summary_table(suffix: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS summary_{suffix} (
            id BIGINT PRIMARY KEY,
            queue_code BYTEA NOT NULL DEFAULT '',
            reset_count BIGINT NOT NULL DEFAULT 0,
            name TEXT NOT NULL,
            caption TEXT NOT NULL DEFAULT '',
            require_admit BOOLEAN NOT NULL DEFAULT FALSE,
            maintenance BOOLEAN NOT NULL DEFAULT FALSE,
            delete_flag BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"
    )
}

pub fn queue_table(suffix: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS queue_{suffix} (
            id BIGSERIAL PRIMARY KEY,
            queue_code BYTEA NOT NULL,
            uid BIGINT NOT NULL,
            keycode_prefix BIGINT NOT NULL,
            keycode_suffix TEXT NOT NULL,
            mail_addr TEXT NOT NULL DEFAULT '',
            mail_count INTEGER NOT NULL DEFAULT 0,
            push_type SMALLINT NOT NULL DEFAULT 0,
            status SMALLINT NOT NULL,
            delete_flag BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (queue_code, keycode_prefix)
        )"
    )
}

/// Reserved, never populated by the operations in `spec.md` — kept for
/// forward compatibility (resolves the spec's keycode-table Open Question).
pub fn keycode_table(suffix: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS keycode_{suffix} (
            id BIGSERIAL PRIMARY KEY,
            keycode_prefix BIGINT NOT NULL,
            keycode_suffix TEXT NOT NULL,
            delete_flag BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (keycode_prefix),
            UNIQUE (keycode_suffix)
        )"
    )
}

/// Reserved per-tenant auth table. Session and identity state all lives in
/// the master `auth_account` table (`vql-auth`); nothing writes here today.
pub fn auth_table(suffix: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS auth_{suffix} (
            id BIGINT PRIMARY KEY,
            delete_flag BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"
    )
}

pub fn sequence_table(suffix: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS sequence_{suffix} (
            name TEXT PRIMARY KEY,
            curr BIGINT NOT NULL,
            increment BIGINT NOT NULL
        )"
    )
}

/// `currseq` / `nextseq` / `setseq` stored functions (`spec.md` §4.4), scoped
/// to this tenant's `sequence_<suffix>` table so `vql-queue` never has to
/// know the suffix itself — it calls `SELECT nextseq_<suffix>('NUM')`
/// inside the same transaction that inserts the queue row.
pub fn sequence_functions(suffix: &str) -> Vec<String> {
    vec![
        format!(
            "CREATE OR REPLACE FUNCTION currseq_{suffix}(seq_name TEXT)
             RETURNS BIGINT AS $$
                SELECT curr FROM sequence_{suffix} WHERE name = seq_name
             $$ LANGUAGE sql"
        ),
        format!(
            "CREATE OR REPLACE FUNCTION nextseq_{suffix}(seq_name TEXT)
             RETURNS BIGINT AS $$
                UPDATE sequence_{suffix}
                   SET curr = curr + increment
                 WHERE name = seq_name
             RETURNING curr
             $$ LANGUAGE sql"
        ),
        format!(
            "CREATE OR REPLACE FUNCTION setseq_{suffix}(seq_name TEXT, new_value BIGINT)
             RETURNS BIGINT AS $$
                UPDATE sequence_{suffix}
                   SET curr = new_value
                 WHERE name = seq_name
             RETURNING curr
             $$ LANGUAGE sql"
        ),
    ]
}

pub fn insert_summary_row(suffix: &str) -> String {
    format!(
        "INSERT INTO summary_{suffix} (id, name, caption, require_admit)
         VALUES (1, $1, $2, FALSE)
         ON CONFLICT (id) DO NOTHING"
    )
}

pub fn seed_sequence_row(suffix: &str) -> String {
    format!(
        "INSERT INTO sequence_{suffix} (name, curr, increment)
         VALUES ('NUM', 0, 1)
         ON CONFLICT (name) DO NOTHING"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_interpolate_the_suffix_into_the_identifier_only() {
        let suffix = "00000000000000ff";
        assert!(summary_table(suffix).contains("summary_00000000000000ff"));
        assert!(queue_table(suffix).contains("queue_00000000000000ff"));
        assert!(sequence_functions(suffix)[1].contains("nextseq_00000000000000ff"));
    }
}
