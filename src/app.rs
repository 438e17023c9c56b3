use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::view::{FetchOutcome, RecommendationView};

/// How long a fetch may run before the busy frame is drawn
const BUSY_FRAME_DELAY: Duration = Duration::from_millis(150);

const SEPARATOR: &str = "----------------------------------------";

/// Runs the line-oriented front-end until EOF or `quit`
///
/// Each input line is a submission (Enter is the trigger). The view is
/// unmounted on exit.
pub async fn run_interactive<R, W>(
    view: &RecommendationView,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_frame(output, &view.render("").await).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }

        submit(view, line, output).await?;
    }

    view.unmount();
    Ok(())
}

/// Submits one input, drawing a busy frame if the request is slow
pub async fn submit<W>(
    view: &RecommendationView,
    input: &str,
    output: &mut W,
) -> anyhow::Result<FetchOutcome>
where
    W: AsyncWrite + Unpin,
{
    let fetch = view.fetch_recommendations(input);
    tokio::pin!(fetch);

    let outcome = tokio::select! {
        outcome = &mut fetch => outcome,
        _ = tokio::time::sleep(BUSY_FRAME_DELAY) => {
            if view.is_loading().await {
                write_frame(output, &view.render(input).await).await?;
            }
            fetch.await
        }
    };

    match outcome {
        FetchOutcome::Busy => {
            tracing::debug!(input = %input, "Submission ignored while loading");
        }
        FetchOutcome::Discarded => {}
        FetchOutcome::Completed | FetchOutcome::Rejected => {
            write_frame(output, &view.render(input).await).await?;
        }
    }

    Ok(outcome)
}

async fn write_frame<W>(output: &mut W, frame: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(SEPARATOR.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.write_all(frame.as_bytes()).await?;
    output.flush().await
}
