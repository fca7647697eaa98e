//! Playback scenarios through the public API, on virtual time

use std::time::Duration;

use tokio::task::LocalSet;
use tokio::time::sleep;

use termynal::clipboard::MemoryClipboard;
use termynal::player::{HeadlessSurface, InputResult, Intent, Phase, TokioClock};
use termynal::{Document, Options, Termynal, TermynalBuilder};

fn headless(rows: usize) -> TermynalBuilder {
    Termynal::builder()
        .surface(HeadlessSurface::new(rows))
        .clock(TokioClock)
        .clipboard(MemoryClipboard::new())
}

fn fast() -> Options {
    Options {
        start_delay: Some(0.0),
        type_delay: Some(10.0),
        line_delay: Some(100.0),
        ..Options::default()
    }
}

#[tokio::test(start_paused = true)]
async fn session_plays_to_the_end_and_restarts() {
    let document = Document::from_text(
        "// build it\n$ cargo build\nCompiling termynal\r\n   Finished dev\n# root@box$ make install\n",
    );
    let termynal = headless(24).options(fast()).build(&document, "#termynal").unwrap();

    let local = LocalSet::new();
    local
        .run_until(async {
            termynal.init().await.unwrap();
            assert_eq!(termynal.phase(), Phase::Finished);

            let end_state = termynal.scheduler().rendered_text();
            assert_eq!(
                end_state,
                vec![
                    "💬 build it",
                    "📋$ cargo build",
                    "   Finished dev",
                    "📋root@boxmake install",
                ]
            );

            termynal.dispatch(Intent::Restart);
            sleep(Duration::from_millis(1)).await;
            assert_eq!(termynal.phase(), Phase::Running);
            sleep(Duration::from_secs(5)).await;
            assert_eq!(termynal.scheduler().rendered_text(), end_state);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn deferred_start_waits_for_init() {
    let document = Document::from_text("$ ls\n");
    let termynal = headless(24).options(fast()).build(&document, "#termynal").unwrap();

    let local = LocalSet::new();
    local
        .run_until(async {
            sleep(Duration::from_secs(1)).await;
            assert_eq!(termynal.phase(), Phase::Idle);
            assert!(termynal.scheduler().rendered_text().is_empty());

            termynal.dispatch(Intent::Init);
            sleep(Duration::from_secs(1)).await;
            assert_eq!(termynal.phase(), Phase::Finished);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn container_attributes_configure_playback() {
    let document = Document::parse(
        r#"<pre id="demo" data-ty-startDelay="0" data-ty-lineDelay="50" data-ty-cursor="_">$ ab
two</pre>"#,
    );
    let termynal = headless(24).build(&document, "#demo").unwrap();
    assert_eq!(termynal.options().line_delay, 50.0);
    assert_eq!(termynal.options().cursor, "_");

    let local = LocalSet::new();
    local
        .run_until(async {
            let run = termynal.init();
            // first character lands at 90ms, the second at 180ms
            sleep(Duration::from_millis(100)).await;
            assert_eq!(termynal.scheduler().rendered_text(), vec!["📋$ a"]);
            assert!(termynal.to_html().contains(r#"data-ty-cursor="_""#));
            run.await.unwrap();
        })
        .await;
    assert_eq!(termynal.scheduler().rendered_text(), vec!["📋$ ab", "two"]);
    assert!(!termynal.to_html().contains("data-ty-cursor"));
}

#[tokio::test(start_paused = true)]
async fn speed_up_shortens_the_whole_run() {
    let document = Document::from_text("$ a long enough command\noutput\n");

    let mut durations = Vec::new();
    for clicks in 0..3 {
        let termynal = headless(24).build(&document, "#termynal").unwrap();
        for _ in 0..clicks {
            termynal.dispatch(Intent::SpeedUp);
        }
        let started = tokio::time::Instant::now();
        let local = LocalSet::new();
        local.run_until(async { termynal.init().await }).await.unwrap();
        durations.push(started.elapsed());
    }

    assert!(durations[1] < durations[0]);
    assert!(durations[2] < durations[1]);
}

#[tokio::test(start_paused = true)]
async fn quit_is_reported_to_the_caller() {
    let document = Document::from_text("x\n");
    let termynal = headless(24).build(&document, "#termynal").unwrap();
    assert_eq!(termynal.dispatch(Intent::Redraw), InputResult::Continue);
    assert_eq!(termynal.dispatch(Intent::Quit), InputResult::Quit);
}
