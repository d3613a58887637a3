//! Interactive footprint prompt: read addresses, print details, stop on `exit`.

use std::io::{BufRead, Write};

use crate::config::Footprint;
use crate::graph::contact_graph::ContactGraph;
use crate::graph::query::QueryService;

pub const PROMPT: &str = "Email address of the individual (or EXIT to quit): ";
pub const EXIT_WORD: &str = "exit";

/// Render the details block for a present identity.
pub fn format_footprint(fp: &Footprint) -> String {
    format!(
        "Details for {}:\n\
         Number of unique email addresses sent to: {}\n\
         Number of unique email addresses received from: {}\n\
         Number of email addresses in the same team: {}\n",
        fp.identity, fp.sent, fp.received, fp.team_size
    )
}

/// Run the prompt loop until `exit` (any case) or end of input.
///
/// Returns the number of lookups answered, found or not.
pub fn run_query_session<R: BufRead, W: Write>(
    graph: &ContactGraph,
    input: R,
    mut output: W,
) -> std::io::Result<usize> {
    let service = QueryService::new(graph);
    let mut answered = 0;
    let mut lines = input.lines();

    loop {
        writeln!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case(EXIT_WORD) {
            writeln!(output, "Goodbye!")?;
            break;
        }

        let fp = service.describe(query);
        if fp.present {
            write!(output, "{}", format_footprint(&fp))?;
        } else {
            writeln!(output, "Email address ({query}) not found in the dataset.")?;
        }
        answered += 1;
    }

    Ok(answered)
}
