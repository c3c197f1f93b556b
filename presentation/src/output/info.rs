//! GLP-1 medication reference text for the `info` command

use colored::Colorize;

use super::console::{DATA_SOURCE, DISCLAIMER};

/// Generic name and the brands it is sold under
pub const MEDICATIONS: [(&str, &str); 5] = [
    ("Semaglutide", "Ozempic, Wegovy"),
    ("Liraglutide", "Victoza, Saxenda"),
    ("Dulaglutide", "Trulicity"),
    ("Tirzepatide", "Mounjaro, Zepbound"),
    ("Exenatide", "Byetta"),
];

pub const PRIMARY_USES: [&str; 4] = [
    "Type 2 Diabetes Management",
    "Weight Loss/Obesity Treatment",
    "Cardiovascular Risk Reduction",
    "Metabolic Health Improvement",
];

pub const COMMON_SIDE_EFFECTS: [&str; 5] = [
    "Nausea",
    "Vomiting or diarrhea",
    "Reduced appetite",
    "Constipation",
    "Abdominal discomfort",
];

/// Render the reference sheet
pub fn medication_info() -> String {
    let mut output = format!("{}\n", "About GLP-1 Medications".cyan().bold());
    output.push_str(
        "\nGLP-1 receptor agonists mimic the incretin hormone GLP-1. They lower\n\
         blood sugar, slow gastric emptying and reduce appetite.\n",
    );

    output.push_str(&format!("\n{}\n", "Common GLP-1 Medications".bold()));
    for (generic, brands) in MEDICATIONS {
        output.push_str(&format!("  * {} ({})\n", generic.bold(), brands));
    }

    output.push_str(&format!("\n{}\n", "Primary Uses".bold()));
    for item in PRIMARY_USES {
        output.push_str(&format!("  * {}\n", item));
    }

    output.push_str(&format!("\n{}\n", "Common Side Effects".bold()));
    for item in COMMON_SIDE_EFFECTS {
        output.push_str(&format!("  * {}\n", item));
    }

    output.push_str(&format!("\n{}\n{}\n", DISCLAIMER.yellow(), DATA_SOURCE.dimmed()));
    output
}
