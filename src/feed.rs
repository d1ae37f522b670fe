use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::api;
use crate::export;
use crate::state::{Delta, Panel, ProviderCommand};

pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let pool = build_fetch_pool();
        let requested_names = Arc::new(Mutex::new(NameRequests::default()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchRoster => {
                    let tx = tx.clone();
                    spawn_job(&pool, move || match api::fetch_pitchers() {
                        Ok(roster) => {
                            let _ = tx.send(Delta::SetRoster(roster));
                        }
                        Err(err) => send_failure(&tx, None, Panel::Roster, err),
                    });
                }
                ProviderCommand::LoadPitcher { generation, name } => {
                    let tx = tx.clone();
                    let pool_ref = pool.clone();
                    spawn_job(&pool, move || {
                        let Some((first, last)) = api::split_name(&name) else {
                            send_failure(
                                &tx,
                                Some(generation),
                                Panel::PlayerId,
                                anyhow::anyhow!("cannot split name {name:?}"),
                            );
                            return;
                        };
                        match api::fetch_player_id(first, last) {
                            Ok(id) => {
                                let _ = tx.send(Delta::SetPitcherId { generation, id });
                                fetch_dashboard(&pool_ref, &tx, generation, id);
                            }
                            Err(err) => send_failure(&tx, Some(generation), Panel::PlayerId, err),
                        }
                    });
                }
                ProviderCommand::RefreshPitcher {
                    generation,
                    pitcher_id,
                } => fetch_dashboard(&pool, &tx, generation, pitcher_id),
                ProviderCommand::FetchPlayerNames { ids } => {
                    let fresh = requested_names
                        .lock()
                        .expect("requested names lock poisoned")
                        .claim(ids);
                    if fresh.is_empty() {
                        continue;
                    }
                    let tx = tx.clone();
                    let requested_names = requested_names.clone();
                    spawn_job(&pool, move || match api::fetch_player_names(&fresh) {
                        Ok(names) => {
                            let _ = tx.send(Delta::SetPlayerNames(names));
                        }
                        Err(err) => {
                            requested_names
                                .lock()
                                .expect("requested names lock poisoned")
                                .release(&fresh);
                            send_failure(&tx, None, Panel::Names, err);
                        }
                    });
                }
                ProviderCommand::ExportGame {
                    path,
                    pitcher,
                    game,
                    names,
                } => {
                    let tx = tx.clone();
                    spawn_job(&pool, move || {
                        let result =
                            export::export_game(&PathBuf::from(&path), &pitcher, &game, &names)
                                .map(|report| report.pitches)
                                .map_err(|err| format!("{err:#}"));
                        let _ = tx.send(Delta::ExportFinished { path, result });
                    });
                }
            }
        }
    });
}

/// Batter ids already asked for, so a name lookup is never repeated while it
/// is in flight or after it succeeded.
#[derive(Debug, Default)]
pub struct NameRequests {
    requested: HashSet<u32>,
}

impl NameRequests {
    /// Marks `ids` as requested and returns the ones not asked for before,
    /// without duplicates and in input order.
    pub fn claim(&mut self, ids: impl IntoIterator<Item = u32>) -> Vec<u32> {
        ids.into_iter().filter(|id| self.requested.insert(*id)).collect()
    }

    /// Forgets a failed batch so a later selection retries it.
    pub fn release(&mut self, ids: &[u32]) {
        for id in ids {
            self.requested.remove(id);
        }
    }
}

/// Fans the per-pitcher endpoints out over the pool. Each result is tagged
/// with `generation` so the UI can drop it if the selection moved on.
fn fetch_dashboard(pool: &FetchPool, tx: &Sender<Delta>, generation: u64, pitcher_id: u32) {
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Loading dashboard for pitcher {pitcher_id}"
    )));

    let job_tx = tx.clone();
    spawn_job(pool, move || match api::fetch_recent_games(pitcher_id) {
        Ok(games) => {
            let _ = job_tx.send(Delta::SetRecentGames { generation, games });
        }
        Err(err) => send_failure(&job_tx, Some(generation), Panel::Recent, err),
    });

    let job_tx = tx.clone();
    spawn_job(pool, move || match api::fetch_arsenal(pitcher_id) {
        Ok(arsenal) => {
            let _ = job_tx.send(Delta::SetArsenal {
                generation,
                arsenal,
            });
        }
        Err(err) => send_failure(&job_tx, Some(generation), Panel::Arsenal, err),
    });

    let job_tx = tx.clone();
    spawn_job(pool, move || match api::fetch_count_stats(pitcher_id) {
        Ok(counts) => {
            let _ = job_tx.send(Delta::SetCountStats { generation, counts });
        }
        Err(err) => send_failure(&job_tx, Some(generation), Panel::Counts, err),
    });

    let job_tx = tx.clone();
    spawn_job(pool, move || match api::fetch_progression(pitcher_id) {
        Ok(rows) => {
            let _ = job_tx.send(Delta::SetProgression { generation, rows });
        }
        Err(err) => send_failure(&job_tx, Some(generation), Panel::Progression, err),
    });

    let job_tx = tx.clone();
    spawn_job(pool, move || match api::fetch_hit_outcome(pitcher_id) {
        Ok(outcome) => {
            let _ = job_tx.send(Delta::SetHitOutcome {
                generation,
                outcome,
            });
        }
        Err(err) => send_failure(&job_tx, Some(generation), Panel::HitOutcome, err),
    });
}

fn send_failure(tx: &Sender<Delta>, generation: Option<u64>, panel: Panel, err: anyhow::Error) {
    let _ = tx.send(Delta::FetchFailed {
        generation,
        panel,
        message: format!("{err:#}"),
    });
}

type FetchPool = Option<Arc<rayon::ThreadPool>>;

fn build_fetch_pool() -> FetchPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(fetch_parallelism())
        .build()
        .ok()
        .map(Arc::new)
}

fn spawn_job(pool: &FetchPool, job: impl FnOnce() + Send + 'static) {
    if let Some(pool) = pool.as_ref() {
        pool.spawn(job);
    } else {
        thread::spawn(job);
    }
}

fn fetch_parallelism() -> usize {
    env::var("FETCH_PARALLELISM")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(4)
        .clamp(2, 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requests_skip_ids_already_asked_for() {
        let mut requests = NameRequests::default();
        assert_eq!(requests.claim([660271, 592450, 660271]), vec![660271, 592450]);
        assert_eq!(requests.claim([592450, 605141]), vec![605141]);
        assert!(requests.claim([660271]).is_empty());
    }

    #[test]
    fn released_ids_can_be_claimed_again() {
        let mut requests = NameRequests::default();
        let batch = requests.claim([660271, 592450]);
        requests.release(&batch);
        assert_eq!(requests.claim([592450, 660271]), vec![592450, 660271]);
        assert!(requests.claim([660271]).is_empty());
    }
}
