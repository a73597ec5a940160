use std::sync::Arc;

use crossbeam_channel::Sender;
use threadpool::ThreadPool;

use crate::{error::Error, fetch::Fetch, item::Item};

/// Completions posted back to the router.
#[derive(Debug)]
pub enum Event {
    CatalogLoaded(Result<Vec<Item>, Error>),
    ContentLoaded(LoadKey, Result<Arc<str>, Error>),
}

/// Identifies one content request.  `seq` is unique per navigation, so a
/// response for an item that was re-opened is still told apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoadKey {
    pub seq: u64,
    pub url: Arc<str>,
}

/// Runs fetches on a worker pool so they never block the router.
pub struct Loader {
    fetcher: Arc<dyn Fetch>,
    pool: ThreadPool,
    sender: Sender<Event>,
}

impl Loader {
    pub fn new(fetcher: Arc<dyn Fetch>, threads: usize, sender: Sender<Event>) -> Self {
        Self {
            fetcher,
            pool: ThreadPool::with_name("loader".to_string(), threads.max(1)),
            sender,
        }
    }

    pub fn load_catalog(&self, url: &str) {
        let url = url.to_owned();
        self.spawn(move |fetcher| {
            let res = fetcher
                .fetch_text(&url)
                .and_then(|body| Ok(serde_json::from_str::<Vec<Item>>(&body)?));
            Event::CatalogLoaded(res)
        });
    }

    pub fn load_embeddable(&self, key: LoadKey) {
        self.spawn(move |fetcher| {
            let res = fetcher.fetch_text(&key.url).map(Arc::from);
            Event::ContentLoaded(key, res)
        });
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&dyn Fetch) -> Event + Send + 'static,
    {
        let fetcher = self.fetcher.clone();
        let sender = self.sender.clone();
        self.pool.execute(move || {
            let event = job(fetcher.as_ref());
            if sender.send(event).is_err() {
                log::debug!("router is gone, dropping load result");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::unbounded;

    use super::*;

    struct StaticFetch;

    impl Fetch for StaticFetch {
        fn fetch_text(&self, url: &str) -> Result<String, Error> {
            match url {
                "catalog" => Ok(r#"[{"name":"Pong","type":"Arcade","url":"pong","cover":"p.png"}]"#.into()),
                "broken" => Ok("{".into()),
                "pong" => Ok("<html>pong</html>".into()),
                _ => Err(Error::UnexpectedStatus(404)),
            }
        }
    }

    fn loader() -> (Loader, crossbeam_channel::Receiver<Event>) {
        let (sender, receiver) = unbounded();
        (Loader::new(Arc::new(StaticFetch), 2, sender), receiver)
    }

    #[test]
    fn catalog_is_parsed_on_a_worker() {
        let (loader, events) = loader();
        loader.load_catalog("catalog");
        match events.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::CatalogLoaded(Ok(items)) => assert_eq!(&*items[0].name, "Pong"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let (loader, events) = loader();
        loader.load_catalog("broken");
        assert!(matches!(
            events.recv_timeout(Duration::from_secs(5)).unwrap(),
            Event::CatalogLoaded(Err(Error::JsonError(_)))
        ));
    }

    #[test]
    fn content_result_carries_its_key() {
        let (loader, events) = loader();
        let key = LoadKey {
            seq: 3,
            url: "missing".into(),
        };
        loader.load_embeddable(key.clone());
        match events.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::ContentLoaded(got, Err(Error::UnexpectedStatus(404))) => assert_eq!(got, key),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
