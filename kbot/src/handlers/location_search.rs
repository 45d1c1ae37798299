//! Location search: messages carrying a location get the nearest entities and
//! the point is remembered in the session; the `/location` command explains
//! how to share one. Everything else passes through.

use async_trait::async_trait;
use kbot_core::{Context, Handler, Outcome, Reply, Result};
use tracing::debug;

const NEARBY_LIMIT: usize = 5;

pub struct LocationSearchHandler;

#[async_trait]
impl Handler for LocationSearchHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<Outcome> {
        if ctx.update.command() == Some("location") {
            return Ok(Outcome::Reply(Reply::text(ctx.t("location.help"))));
        }

        let Some(location) = ctx.update.location() else {
            return Ok(Outcome::Continue);
        };
        ctx.session.last_location = Some(location);
        debug!(
            user_id = ctx.update.sender.id,
            latitude = location.latitude,
            longitude = location.longitude,
            "Location search"
        );

        let nearby = ctx.resolver()?.nearby(location, NEARBY_LIMIT).await?;
        if nearby.is_empty() {
            return Ok(Outcome::Reply(Reply::text(ctx.t("location.none"))));
        }

        let mut text = ctx.t("location.nearby");
        for entity in &nearby {
            text.push_str(&format!("\n• {} ({})", entity.label, entity.id));
        }
        Ok(Outcome::Reply(Reply::text(text)))
    }
}
