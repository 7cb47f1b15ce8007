// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pull request summary comments.
//!
//! Commenting is best-effort: a failure is logged and reported to the
//! caller, but never fails the run; the changesets are already on disk.

use crate::render::ChangesetRecord;

use super::{PrContext, PullRequestHost};

/// Build the summary comment body.
pub fn comment_body(records: &[ChangesetRecord], dry_run: bool) -> String {
    let mut body = String::from("### Changesets\n\n");

    if records.is_empty() {
        body.push_str("No changesets were created for this pull request.\n");
        return body;
    }

    body.push_str(&format!(
        "Created {} changeset{} for this pull request:\n\n",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    ));

    for record in records {
        body.push_str(&format!(
            "- `{}`: {} `{}` ({})\n",
            record.file_name(),
            record.update_type,
            record.package,
            record.bump
        ));
    }

    if dry_run {
        body.push_str("\n_Dry run: no files were written._\n");
    }

    body
}

/// Post the summary comment, swallowing failures.
///
/// Returns whether the comment was actually posted.
pub fn post_summary(host: &dyn PullRequestHost, ctx: &PrContext, body: &str) -> bool {
    match host.create_comment(ctx, body) {
        Ok(()) => {
            tracing::debug!("Posted summary comment on {}#{}", ctx.full_repo(), ctx.number);
            true
        }
        Err(e) => {
            tracing::warn!(
                "Failed to comment on {}#{}: {}",
                ctx.full_repo(),
                ctx.number,
                e
            );
            false
        }
    }
}
