//! Scripted editor session.
//!
//! Drives a short editing session against the simulated responder and prints
//! the final rendered page as JSON. Useful for eyeballing template and theme
//! changes without a UI host.

use leadmagnet_editor::config::EditorConfig;
use leadmagnet_editor::conversation::Channel;
use leadmagnet_editor::navigator::{EditorMode, PreviewPage, Section};
use leadmagnet_editor::session::EditorSession;
use leadmagnet_editor::shell::{Action, ClickTarget};
use leadmagnet_editor::style::StyleProperty;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = EditorConfig::from_env()?;
    let (session, mut actions) = EditorSession::from_config(config);

    session.dispatch(|s| s.open_editor()).await;

    // Global chat: a title change switches the quiz to its animated theme.
    let sent = session.dispatch(|s| s.send(Channel::Global, "Change the title of the magnet.")).await;
    for reply in sent.replies {
        reply.await?;
    }

    // Inline styling on the landing page.
    session.dispatch(|s| s.set_page(PreviewPage::DataCapture)).await;
    session.dispatch(|s| s.set_mode(EditorMode::Design)).await;
    let title = session
        .read(|s| s.doc().find_key("hero-title").map(|n| (n.id(), n.kind())))
        .await;
    if let Some((id, kind)) = title {
        session.dispatch(|s| s.click(ClickTarget::Element { id, kind })).await;
        session.dispatch(|s| s.update_style(StyleProperty::FontWeight, "650")).await;
        session.dispatch(|s| s.update_style(StyleProperty::TextAlign, "center")).await;
    }
    session.dispatch(|s| s.select_palette("ocean-blue")).await;

    // Section chat on the results page.
    session.dispatch(|s| s.set_mode(EditorMode::Controls)).await;
    let traits = Channel::Section(Section::PersonalityTraits);
    session.dispatch(|s| s.prompt_click(traits, "Add a Learn More button to each trait.")).await;
    let sent = session.dispatch(|s| s.submit(traits)).await;
    for reply in sent.replies {
        reply.await?;
    }

    let mut repaints = 0usize;
    while let Ok(action) = actions.try_recv() {
        if action == Action::RenderNeeded {
            repaints += 1;
        }
    }
    tracing::info!(repaints, "scripted session finished");

    let page = session.render().await;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
