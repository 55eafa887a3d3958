//! Verilog rendering: log table → combinational lookup module.
//!
//! The module is a single `always @*` block whose case statement maps each
//! address to its table entry, with a default arm driving zero.

use crate::emit::VerilogFile;
use crate::error::GenerateError;

/// Module name, port widths, and other fixed parts of the emitted header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleShape {
    /// Verilog module identifier.
    pub name: String,
    /// Width of the `addr` input in bits.
    pub addr_width: u32,
    /// Width of the registered `data` output in bits.
    pub data_width: u32,
}

impl Default for ModuleShape {
    fn default() -> Self {
        Self {
            name: "LogTable".to_string(),
            addr_width: 15,
            data_width: 20,
        }
    }
}

/// Renders `table` with the stock `LogTable` shape (15-bit address, 20-bit data).
pub fn render_module(table: &[u32]) -> String {
    render_module_with(table, &ModuleShape::default())
}

/// Renders `table` as a Verilog module of the given shape.
///
/// The `SIZE` parameter is the table length, so the header always agrees
/// with the number of case arms.
pub fn render_module_with(table: &[u32], shape: &ModuleShape) -> String {
    let w = shape.data_width;
    let mut f = VerilogFile::new();
    f.reserve(table.len() + 12);

    f.line(&format!(
        "module {} #(parameter SIZE = {}) (",
        shape.name,
        table.len()
    ));
    f.indent(1);
    f.line(&format!("input  [{}:0] addr,", shape.addr_width.saturating_sub(1)));
    f.line(&format!("output reg [{}:0] data", w.saturating_sub(1)));
    f.dedent(1);
    f.line(");");
    f.blank();

    f.indent(1);
    f.line("always @* begin");
    f.indent(1);
    f.line("case (addr)");
    f.indent(1);
    for (i, value) in table.iter().enumerate() {
        f.line(&format!("{i}: data = {w}'d{value};"));
    }
    f.line(&format!("default: data = {w}'d0;"));
    f.dedent(1);
    f.line("endcase");
    f.dedent(1);
    f.line("end");
    f.dedent(1);
    f.line("endmodule");

    f.finish()
}

/// Extracts the numbered case arms (`<index>: data = <w>'d<value>;`) from
/// rendered text, in the order they appear. The default arm and any line
/// that is not a case arm are skipped.
pub fn parse_case_arms(text: &str) -> Vec<(usize, u64)> {
    text.lines().filter_map(parse_arm).collect()
}

fn parse_arm(line: &str) -> Option<(usize, u64)> {
    let (lhs, rhs) = line.trim().split_once(": data = ")?;
    let index = lhs.parse().ok()?;
    let (_, literal) = rhs.split_once("'d")?;
    let value = literal.strip_suffix(';')?.parse().ok()?;
    Some((index, value))
}

/// Checks that `text` holds exactly one arm per table entry, numbered from
/// zero in increasing order, each carrying the table's value.
///
/// # Errors
///
/// Returns [`GenerateError::ArmCount`] if the number of arms differs from
/// the table length, or [`GenerateError::ArmMismatch`] for the first arm
/// whose index or value is wrong.
pub fn check_arms(text: &str, table: &[u32]) -> Result<(), GenerateError> {
    let arms = parse_case_arms(text);
    if arms.len() != table.len() {
        return Err(GenerateError::ArmCount {
            expected: table.len(),
            found: arms.len(),
        });
    }
    for (position, (&(index, found), &expected)) in arms.iter().zip(table).enumerate() {
        if index != position || found != u64::from(expected) {
            return Err(GenerateError::ArmMismatch {
                position,
                index,
                found,
                expected,
            });
        }
    }
    Ok(())
}

/// 1-based number of the first line where `a` and `b` differ. When one
/// text is a prefix of the other, this is the line just past the shorter.
pub fn first_differing_line(a: &str, b: &str) -> usize {
    let mut left = a.split('\n');
    let mut right = b.split('\n');
    let mut line = 1;
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) if x == y => line += 1,
            _ => return line,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::table::compute_table;

    const THREE_ENTRY_MODULE: &str = "\
module LogTable #(parameter SIZE = 3) (
    input  [14:0] addr,
    output reg [19:0] data
);

    always @* begin
        case (addr)
            0: data = 20'd0;
            1: data = 20'd6931;
            2: data = 20'd10986;
            default: data = 20'd0;
        endcase
    end
endmodule";

    #[test]
    fn renders_exact_template() {
        assert_eq!(render_module(&compute_table(3)), THREE_ENTRY_MODULE);
    }

    #[test]
    fn single_entry_arm_precedes_default() {
        let text = render_module(&compute_table(1));
        assert!(text.contains(
            "            0: data = 20'd0;\n            default: data = 20'd0;\n"
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let table = compute_table(257);
        assert_eq!(render_module(&table), render_module(&table));
    }

    #[test]
    fn one_arm_per_entry_plus_default() {
        let table = compute_table(100);
        let text = render_module(&table);
        let arms = parse_case_arms(&text);
        assert_eq!(arms.len(), 100);
        assert!(arms.iter().enumerate().all(|(i, &(idx, _))| i == idx));
        assert_eq!(text.matches("default:").count(), 1);
    }

    #[test]
    fn header_size_tracks_table_length() {
        let text = render_module(&compute_table(5));
        assert!(text.starts_with("module LogTable #(parameter SIZE = 5) ("));
    }

    #[test]
    fn custom_shape() {
        let shape = ModuleShape {
            name: "Ln8".to_string(),
            addr_width: 3,
            data_width: 16,
        };
        let text = render_module_with(&compute_table(8), &shape);
        assert!(text.starts_with("module Ln8 #(parameter SIZE = 8) ("));
        assert!(text.contains("    input  [2:0] addr,\n"));
        assert!(text.contains("    output reg [15:0] data\n"));
        assert!(text.contains("7: data = 16'd20794;"));
        assert!(text.contains("default: data = 16'd0;"));
    }

    #[test]
    fn arms_parse_back_to_table() {
        let table = compute_table(2048);
        let parsed: Vec<u32> = parse_case_arms(&render_module(&table))
            .into_iter()
            .map(|(_, v)| u32::try_from(v).unwrap())
            .collect();
        assert_eq!(parsed, table);
    }

    #[test]
    fn check_accepts_matching_text() {
        let table = compute_table(64);
        check_arms(&render_module(&table), &table).unwrap();
    }

    #[test]
    fn check_reports_wrong_value() {
        let text = THREE_ENTRY_MODULE.replace("20'd6931", "20'd6932");
        let err = check_arms(&text, &compute_table(3)).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ArmMismatch {
                position: 1,
                index: 1,
                found: 6932,
                expected: 6931,
            }
        ));
    }

    #[test]
    fn check_reports_arm_count() {
        let err = check_arms(THREE_ENTRY_MODULE, &compute_table(4)).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ArmCount {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn first_difference_is_located() {
        assert_eq!(first_differing_line("a\nb\nc", "a\nx\nc"), 2);
        assert_eq!(first_differing_line("a\nb", "a\nb\nc"), 3);
        assert_eq!(first_differing_line("a\nb\n", "a\nb"), 3);
    }
}
