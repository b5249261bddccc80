use crate::model::{CheckSummary, FolderSummary};

/// One line per folder, e.g. `2 new files in Reports, file:///a.pdf, file:///b.pdf.`
pub fn last_check_display(summary: &CheckSummary) -> Vec<String> {
    summary.folders.iter().map(folder_line).collect()
}

fn folder_line(folder: &FolderSummary) -> String {
    let count = folder.files.len();
    let mut line = format!(
        "{} new {} in {}",
        count,
        if count == 1 { "file" } else { "files" },
        folder.name
    );

    for file in &folder.files {
        line.push_str(", ");
        line.push_str(&file.url);
    }

    line.push('.');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileSummary;

    fn file(name: &str) -> FileSummary {
        FileSummary {
            id: name.to_string(),
            name: name.to_string(),
            url: format!("file:///docs/{}", name),
            sent: true,
        }
    }

    #[test]
    fn test_display_lines() {
        let summary = CheckSummary {
            folders: vec![
                FolderSummary {
                    id: "1".to_string(),
                    name: "Empty".to_string(),
                    files: vec![],
                },
                FolderSummary {
                    id: "2".to_string(),
                    name: "Single".to_string(),
                    files: vec![file("a.pdf")],
                },
                FolderSummary {
                    id: "3".to_string(),
                    name: "Many".to_string(),
                    files: vec![file("a.pdf"), file("b.pdf")],
                },
            ],
            attempted: 2,
            sent: 2,
        };

        assert_eq!(
            last_check_display(&summary),
            vec![
                "0 new files in Empty.".to_string(),
                "1 new file in Single, file:///docs/a.pdf.".to_string(),
                "2 new files in Many, file:///docs/a.pdf, file:///docs/b.pdf.".to_string(),
            ]
        );
    }
}
