use std::sync::Arc;

use teloxide::prelude::*;

use crate::handlers::inbound_from;
use crate::router::AppState;

/// Failures are contained by the relay service, so the polling loop never
/// sees an error from here.
pub async fn handle_text(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    state.relay.on_message(inbound_from(&msg)).await;
    Ok(())
}
