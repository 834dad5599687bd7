use comfy_table::{ContentArrangement, Table};

use hero_dice::Location;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["3d6", "Location", "STUNx", "NSTUN", "BODYx", "Sided"]);

    for location in Location::all() {
        let (low, high) = location.roll_range();
        let range = if low == high {
            low.to_string()
        } else {
            format!("{low}-{high}")
        };
        table.add_row(vec![
            range,
            location.to_string(),
            format_multiplier(location.killing_stun_multiplier()),
            format_multiplier(location.normal_stun_multiplier()),
            format_multiplier(location.body_multiplier()),
            if location.is_paired() { "yes" } else { "" }.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn format_multiplier(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("x{value:.0}")
    } else {
        format!("x{value}")
    }
}
