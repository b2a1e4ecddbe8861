use crate::types::summary::RunSummary;

pub fn to_markdown(summary: &RunSummary<'_>) -> String {
    let mut output = String::new();
    output.push_str("# Officiating History Ranking\n\n");
    output.push_str(&format!(
        "- directory: {}\n- freeze date: {}\n- loaded: {}\n- rejected: {}\n\n",
        summary.directory,
        summary.freeze_date,
        summary.loaded,
        summary.rejected.len()
    ));

    if !summary.rejected.is_empty() {
        output.push_str("## Rejected\n\n");
        for rejected in &summary.rejected {
            output.push_str(&format!("- {}: {}\n", rejected.source, rejected.reason));
        }
        output.push('\n');
    }

    for model in &summary.models {
        output.push_str(&format!("## Model `{}`\n\n", model.name));
        for leaders in &model.leaders {
            output.push_str(&format!("### {}\n\n", leaders.role));
            if leaders.officials.is_empty() {
                output.push_str("- none\n\n");
                continue;
            }
            output.push_str("| # | Name | Cert | Weight | Qualified |\n");
            output.push_str("|---|------|------|--------|-----------|\n");
            for (index, ranked) in leaders.officials.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.2} | {} |\n",
                    index + 1,
                    ranked.name,
                    ranked.certification,
                    ranked.weight,
                    ranked.qualified
                ));
            }
            output.push('\n');
        }
    }

    if !summary.exports.is_empty() {
        output.push_str("## Exports\n\n");
        for export in &summary.exports {
            output.push_str(&format!("- {export}\n"));
        }
    }

    output
}
