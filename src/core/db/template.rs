/// Query Template Module
///
/// Caller SQL may reference `@TableName` and `@DatabaseName`. In literal
/// mode both tokens are spliced in verbatim; no quoting or escaping takes
/// place, so a hostile table or database name ends up in the SQL text
/// unchanged. Quoted mode validates the table name as an identifier and
/// quotes both values before splicing.
use crate::core::{DbSetError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

pub const TABLE_NAME_TOKEN: &str = "@TableName";
pub const DATABASE_NAME_TOKEN: &str = "@DatabaseName";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles"));

/// How placeholders are substituted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateMode {
    /// Verbatim text replacement
    #[default]
    Literal,
    /// Validated, quoted identifiers and literals
    Quoted,
}

/// Replaces every placeholder occurrence verbatim.
///
/// An unset table name becomes the empty string.
pub fn expand(template: &str, table_name: Option<&str>, database_name: &str) -> String {
    template
        .replace(TABLE_NAME_TOKEN, table_name.unwrap_or(""))
        .replace(DATABASE_NAME_TOKEN, database_name)
}

pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Expands templates for one record type under a fixed mode
#[derive(Debug, Clone, Copy)]
pub struct TemplateExpander<'a> {
    mode: TemplateMode,
    record: &'static str,
    table_name: Option<&'a str>,
    database_name: &'a str,
}

impl<'a> TemplateExpander<'a> {
    pub fn new(
        mode: TemplateMode,
        record: &'static str,
        table_name: Option<&'a str>,
        database_name: &'a str,
    ) -> Self {
        TemplateExpander {
            mode,
            record,
            table_name,
            database_name,
        }
    }

    /// Expands `template` according to the mode.
    ///
    /// # Errors
    ///
    /// Quoted mode only: `SchemaMissing` when the template names the table
    /// but none is mapped, `InvalidIdentifier` when the mapped table name is
    /// not a plain identifier.
    pub fn expand(&self, template: &str) -> Result<String> {
        match self.mode {
            TemplateMode::Literal => Ok(expand(template, self.table_name, self.database_name)),
            TemplateMode::Quoted => self.expand_quoted(template),
        }
    }

    fn expand_quoted(&self, template: &str) -> Result<String> {
        let mut sql = template.to_string();

        if sql.contains(TABLE_NAME_TOKEN) {
            let table = self.table_name.ok_or(DbSetError::SchemaMissing {
                record: self.record,
            })?;
            if !is_valid_identifier(table) {
                return Err(DbSetError::InvalidIdentifier(table.to_string()));
            }
            sql = sql.replace(TABLE_NAME_TOKEN, &quote_identifier(table));
        }

        if sql.contains(DATABASE_NAME_TOKEN) {
            sql = sql.replace(DATABASE_NAME_TOKEN, &quote_literal(self.database_name));
        }

        Ok(sql)
    }
}
