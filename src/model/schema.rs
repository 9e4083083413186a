//! Static table definitions shared by the SQL builder and the schema synchronizer.

/// A data column. `id` and the timestamp columns are implied for every table.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    /// Type and constraints as written in `ADD COLUMN`.
    pub ddl: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct UniqueIndex {
    pub name: &'static str,
    pub column: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct ForeignKey {
    pub name: &'static str,
    pub column: &'static str,
    pub references: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct TableSchema {
    pub table: &'static str,
    pub columns: &'static [Column],
    pub unique: &'static [UniqueIndex],
    pub foreign_keys: &'static [ForeignKey],
}

/// Columns every table carries besides its data columns.
pub const ID_COLUMN: &str = "id";
pub const TIMESTAMP_COLUMNS: [Column; 3] = [
    Column {
        name: "created_at",
        ddl: "TIMESTAMPTZ NOT NULL DEFAULT NOW()",
    },
    Column {
        name: "updated_at",
        ddl: "TIMESTAMPTZ NOT NULL DEFAULT NOW()",
    },
    Column {
        name: "deleted_at",
        ddl: "TIMESTAMPTZ",
    },
];
pub const DELETED_AT: &str = "deleted_at";

impl TableSchema {
    /// Data column names in insert order.
    pub fn data_columns(&self) -> impl Iterator<Item = &'static str> {
        let columns: &'static [Column] = self.columns;
        columns.iter().map(|c| c.name)
    }

    /// Every column a row of this table is read with: id, data columns, timestamps.
    pub fn all_columns(&self) -> Vec<&'static str> {
        std::iter::once(ID_COLUMN)
            .chain(self.data_columns())
            .chain(TIMESTAMP_COLUMNS.iter().map(|c| c.name))
            .collect()
    }
}
