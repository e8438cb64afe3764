use comfy_table::{ContentArrangement, Table};
use dg_core::Patron;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "", "Patron", "Domain"]);
    for patron in Patron::all() {
        table.add_row(vec![patron.id, patron.symbol, patron.name, patron.domain]);
    }
    println!("{table}");
    Ok(())
}
