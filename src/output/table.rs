//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{
        Alignment, Modify, Style,
        object::{Columns, Object, Rows},
    },
};

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    styled(Table::new(data)).to_string()
}

/// Format data as a table with every column from `first_numeric` on
/// right-aligned. Used for count columns.
pub fn format_counts_table<T: Tabled>(data: &[T], first_numeric: usize) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = styled(Table::new(data));
    table.with(
        Modify::new(Columns::new(first_numeric..).not(Rows::first())).with(Alignment::right()),
    );
    table.to_string()
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table
}
