use futures::future::try_join_all;
use futures::TryFutureExt;

use crate::domain::signal::Signal;
use crate::errors::domain::{BarrierPhase, DomainError};

/// Wait for every player's signal to resolve.
///
/// Fails fast: the first signal to fail ends the wait with a
/// `DomainError::Barrier` naming that player. An empty set resolves
/// immediately.
pub async fn wait_all<'a, I>(phase: BarrierPhase, signals: I) -> Result<(), DomainError>
where
    I: IntoIterator<Item = (&'a str, Signal)>,
{
    let waits = signals.into_iter().map(|(player, signal)| {
        let player = player.to_owned();
        signal
            .wait()
            .map_err(move |cause| DomainError::barrier(phase, player, cause))
    });

    try_join_all(waits).await?;
    Ok(())
}
