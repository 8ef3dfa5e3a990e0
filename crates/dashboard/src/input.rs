use std::io::BufRead;
use tokio::sync::mpsc;

/// One line typed on stdin while the dashboard runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Refresh,
    ClearSearch,
    Quit,
    Search(String),
}

pub fn parse_line(line: &str) -> Option<InputCommand> {
    match line.trim() {
        "" => None,
        ":r" | ":refresh" => Some(InputCommand::Refresh),
        ":c" | ":clear" => Some(InputCommand::ClearSearch),
        ":q" | ":quit" => Some(InputCommand::Quit),
        term => Some(InputCommand::Search(term.to_string())),
    }
}

/// Read lines on a detached OS thread and forward them to the runtime, so a
/// pending read never blocks runtime shutdown.
pub fn forward_lines<R>(reader: R) -> anyhow::Result<mpsc::UnboundedReceiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to read stdin");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}
