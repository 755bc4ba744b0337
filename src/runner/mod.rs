pub mod pacer;

use tracing::{debug, info, warn};

use crate::hibp::client::{BreachApi, Endpoint};
use crate::hibp::outcome::{classify, FatalError, Outcome};
use crate::report::finding::Findings;
use crate::settings::Service;
use pacer::Pacer;

/// One lookup for one email. Matches are appended to `findings`, which is
/// handed back; a fatal status ends the run.
pub async fn check<A: BreachApi>(
    api: &A,
    endpoint: Endpoint,
    email: &str,
    mut findings: Findings,
    pacer: &mut Pacer,
) -> Result<Findings, FatalError> {
    let response = api.lookup(endpoint, email).await?;

    match classify(endpoint, email, api.user_agent(), &response)? {
        Outcome::Found(matches) => {
            debug!(%endpoint, email, count = matches.len(), "matches found");
            findings.extend(matches);
        }
        Outcome::NoMatch => {}
        Outcome::BadRequest => {
            warn!("Bad Request. Check that {} is formatted properly!", email);
        }
        Outcome::RateLimited(delay) => {
            warn!(%endpoint, email, "rate limited, next request in {}s", delay.as_secs());
            pacer.rate_limited(delay);
        }
        Outcome::Unexpected(status) => {
            warn!(%endpoint, email, status, "unexpected response status, skipping");
        }
    }

    pacer.wait().await;
    Ok(findings)
}

/// Run every selected lookup for every email, strictly one after another.
pub async fn run_checks<A: BreachApi>(
    api: &A,
    emails: &[String],
    service: Service,
    pacer: &mut Pacer,
) -> Result<Findings, FatalError> {
    info!(service = %service, emails = emails.len(), "starting checks");

    let mut findings = Findings::new();
    let total = emails.len();

    for (i, email) in emails.iter().enumerate() {
        info!("Processing {} / {} : {}", i + 1, total, email);
        for endpoint in service.endpoints() {
            findings = check(api, *endpoint, email, findings, pacer).await?;
        }
    }

    info!(findings = findings.len(), "checks completed");
    Ok(findings)
}
