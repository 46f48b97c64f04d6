//! Cleaned-document assembly.

use crate::model::attachment::AttachmentRecord;

/// Build the text of a cleaned email document.
///
/// Layout: a `DATE:`/`SUBJECT:`/`TO:`/`FROM:` header block, an
/// `ATTACHMENTS:` list when any were saved, then a blank line and the
/// body verbatim. Absent headers render as `None`.
pub fn assemble_document(
    date: &str,
    subject: Option<&str>,
    to: Option<&str>,
    from: Option<&str>,
    attachments: &[AttachmentRecord],
    body: &str,
) -> String {
    let mut doc = String::new();
    doc.push_str(&format!("DATE: {date}\n"));
    doc.push_str(&format!("SUBJECT: {}\n", subject.unwrap_or("None")));
    doc.push_str(&format!("TO: {}\n", to.unwrap_or("None")));
    doc.push_str(&format!("FROM: {}\n", from.unwrap_or("None")));
    if !attachments.is_empty() {
        doc.push_str("ATTACHMENTS:\n");
        for record in attachments {
            doc.push_str(&format!("- {}\n", record.filename));
        }
    }
    doc.push('\n');
    doc.push_str(body);
    doc
}

/// Name a cleaned document: `{date}__{slug}.txt`, with the message id
/// squeezed in front of the extension when one is known.
pub fn document_filename(date: &str, slug: &str, message_id: Option<&str>) -> String {
    match message_id {
        Some(id) => format!("{date}__{slug}__{id}.txt"),
        None => format!("{date}__{slug}.txt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> AttachmentRecord {
        AttachmentRecord {
            filename: name.to_string(),
            content_type: "application/pdf".to_string(),
            size: 9,
        }
    }

    #[test]
    fn test_layout_without_attachments() {
        let doc = assemble_document(
            "2013-07-05",
            Some("Re:"),
            Some("Will Jakobson <will@jmail.com>"),
            Some("Stu Bettler <stu@bmail.com>"),
            &[],
            "Hey Will,\n",
        );
        assert_eq!(
            doc,
            "DATE: 2013-07-05\n\
             SUBJECT: Re:\n\
             TO: Will Jakobson <will@jmail.com>\n\
             FROM: Stu Bettler <stu@bmail.com>\n\
             \n\
             Hey Will,\n"
        );
    }

    #[test]
    fn test_attachments_block_preserves_order() {
        let doc = assemble_document(
            "2015-06-19",
            Some("Revisions"),
            None,
            None,
            &[record("b.pdf"), record("a.pdf")],
            "drafts\n",
        );
        assert!(doc.contains("ATTACHMENTS:\n- b.pdf\n- a.pdf\n\ndrafts\n"));
        assert!(doc.contains("TO: None\n"));
        assert!(doc.contains("FROM: None\n"));
    }

    #[test]
    fn test_body_appended_verbatim() {
        let doc = assemble_document("Unknown", None, None, None, &[], "no trailing newline");
        assert!(doc.ends_with("\nno trailing newline"));
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            document_filename("2011-07-10", "beautifulandstunning", None),
            "2011-07-10__beautifulandstunning.txt"
        );
        assert_eq!(
            document_filename("2011-07-10", "beautifulandstunning", Some("test_id_10")),
            "2011-07-10__beautifulandstunning__test_id_10.txt"
        );
    }
}
