use std::{
    fs,
    path::{Path, PathBuf},
    sync::{mpsc, Arc},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations::run_migrations;

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

/// Owns the store thread. Dropping the sender ends its receive loop.
struct StoreWorker {
    jobs: Option<mpsc::Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                warn!("moodlens store thread panicked");
            }
        }
    }
}

/// Handle to the entry store. Clones share one SQLite connection that lives on
/// a dedicated thread; the thread stops with the last clone.
#[derive(Clone)]
pub struct Database {
    worker: Arc<StoreWorker>,
}

fn open_connection(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database {}", path.display()))?;
    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        warn!("WAL journal mode unavailable: {err}");
    }
    run_migrations(&mut conn).context("failed to run database migrations")?;
    Ok(conn)
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create database directory {}", dir.display()))?;
        }

        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>();
        let (opened_tx, opened_rx) = mpsc::channel::<Result<()>>();
        let path = db_path.clone();

        let thread = thread::Builder::new()
            .name("moodlens-db".into())
            .spawn(move || {
                let mut conn = match open_connection(&path) {
                    Ok(conn) => conn,
                    Err(err) => {
                        let _ = opened_tx.send(Err(err));
                        return;
                    }
                };
                if opened_tx.send(Ok(())).is_err() {
                    return;
                }
                for job in jobs_rx {
                    job(&mut conn);
                }
                info!("moodlens store closed");
            })
            .context("failed to spawn database thread")?;

        opened_rx
            .recv()
            .context("database thread exited during startup")??;
        info!("moodlens store ready at {}", db_path.display());

        Ok(Self {
            worker: Arc::new(StoreWorker {
                jobs: Some(jobs_tx),
                thread: Some(thread),
            }),
        })
    }

    /// Run `task` against the connection and await its result.
    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::new(move |conn| {
            let _ = reply_tx.send(task(conn));
        });

        self.worker
            .jobs
            .as_ref()
            .ok_or_else(|| anyhow!("database is closed"))?
            .send(job)
            .map_err(|_| anyhow!("database thread is no longer running"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("database thread dropped the request"))?
    }
}
