//! Roster output: a tabbed grid (one row per employee, one column per day)
//! and an XML wrapper around the same cells.

use std::fmt::Write as _;

use nurseroster_core::State;

/// One row per employee (Y), concatenating per-day (Z) the assigned shift
/// name, tab-separated. An empty assignment emits an empty cell. When more
/// than one shift is assigned on the same day (a state a feasible solution
/// never reaches but the format must still render), cells are joined with
/// `/`.
pub fn to_tabbed(state: &State<'_>) -> String {
    let size = state.size();
    let mut out = String::new();
    for y in 0..size.y {
        for z in 0..size.z {
            if z > 0 {
                out.push('\t');
            }
            write_day_cell(&mut out, state, y, z);
        }
        out.push('\n');
    }
    out
}

fn write_day_cell(out: &mut String, state: &State<'_>, y: usize, z: usize) {
    let size = state.size();
    let mut first = true;
    for x in 0..size.x {
        let assigned = (0..size.w).any(|w| state.get(x, y, z, w));
        if assigned {
            if !first {
                out.push('/');
            }
            out.push_str(&state.shifts()[x].name);
            first = false;
        }
    }
}

/// Wraps the tabbed grid in the `<Roster>` XML variant, one `<Employee>`
/// element per row and one `<Day>` element per cell.
pub fn to_xml(state: &State<'_>) -> String {
    let size = state.size();
    let mut out = String::new();
    out.push_str("<Roster xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n");
    for y in 0..size.y {
        let _ = writeln!(out, "  <Employee name=\"{}\">", xml_escape(&state.employees()[y].name));
        for z in 0..size.z {
            let mut cell = String::new();
            write_day_cell(&mut cell, state, y, z);
            let _ = writeln!(out, "    <Day index=\"{z}\">{}</Day>", xml_escape(&cell));
        }
        out.push_str("  </Employee>\n");
    }
    out.push_str("</Roster>\n");
    out
}

fn xml_escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
