/// 화면 캐시 갱신 신호
/// 쓰기 작업이 끝나면 영향받는 화면 경로를 발행한다. 렌더링 계층이 구독해 캐시를 비운다.
// region:    --- Imports
use tokio::sync::broadcast;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Revalidator Trait
pub trait Revalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);

    fn revalidate_paths(&self, paths: &[String]) {
        for path in paths {
            self.revalidate_path(path);
        }
    }
}

// endregion: --- Revalidator Trait

// region:    --- Broadcast Revalidator
pub struct BroadcastRevalidator {
    sender: broadcast::Sender<String>,
}

impl BroadcastRevalidator {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// 갱신 경로 구독
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastRevalidator {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Revalidator for BroadcastRevalidator {
    fn revalidate_path(&self, path: &str) {
        info!("{:<12} --> 경로 갱신: {}", "Revalidate", path);
        // 구독자가 없으면 전송 실패, 무시
        if self.sender.send(path.to_string()).is_err() {
            debug!("{:<12} --> 구독자 없음: {}", "Revalidate", path);
        }
    }
}

// endregion: --- Broadcast Revalidator

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_paths_in_order() {
        let revalidator = BroadcastRevalidator::new(8);
        let mut rx = revalidator.subscribe();

        revalidator.revalidate_paths(&["/auctions".to_string(), "/auctions/3".to_string()]);

        assert_eq!(rx.recv().await.unwrap(), "/auctions");
        assert_eq!(rx.recv().await.unwrap(), "/auctions/3");
    }

    #[test]
    fn no_subscriber_is_fine() {
        BroadcastRevalidator::default().revalidate_path("/cart");
    }
}
