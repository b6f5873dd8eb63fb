use futures_util::StreamExt;
use link::{Pull, Push};
use tokio::time::{Duration, sleep, timeout};

async fn wait_for_peers<T: codec::Codec>(push: &Push<T>, count: usize) {
    timeout(Duration::from_secs(5), async {
        while push.peer_count().await < count {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("peers did not connect in time");
}

#[tokio::test]
async fn test_send_and_recv() {
    let push = Push::<u32>::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = push.local_addr();

    let mut pull = Pull::<u32>::connect(addr).await.expect("connect failed");
    wait_for_peers(&push, 1).await;

    push.send(&100).await.expect("send failed");

    let value = timeout(Duration::from_secs(5), pull.recv())
        .await
        .expect("recv timed out")
        .expect("recv failed");
    assert_eq!(value, Some(100));
}

#[tokio::test]
async fn test_messages_arrive_in_order() {
    let push = Push::<u32>::bind("127.0.0.1:0").await.unwrap();
    let addr = push.local_addr();

    let mut pull = Pull::<u32>::connect(addr).await.unwrap();
    wait_for_peers(&push, 1).await;

    for i in 0..20u32 {
        push.send(&(i * 10)).await.expect("send failed");
    }

    for i in 0..20u32 {
        let value = timeout(Duration::from_secs(5), pull.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value, Some(i * 10));
    }
}

#[tokio::test]
async fn test_fan_out_to_multiple_peers() {
    let push = Push::<String>::bind("127.0.0.1:0").await.unwrap();
    let addr = push.local_addr();

    let mut pulls = Vec::new();
    for _ in 0..3 {
        pulls.push(Pull::<String>::connect(addr).await.unwrap());
    }
    wait_for_peers(&push, 3).await;

    let msg = "frame 0".to_string();
    push.send(&msg).await.expect("send failed");

    for pull in pulls.iter_mut() {
        let value = timeout(Duration::from_secs(5), pull.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value.as_deref(), Some("frame 0"));
    }
}

#[tokio::test]
async fn test_peer_disconnect_is_detected() {
    let push = Push::<u32>::bind("127.0.0.1:0").await.unwrap();
    let addr = push.local_addr();

    let pull_a = Pull::<u32>::connect(addr).await.unwrap();
    let mut pull_b = Pull::<u32>::connect(addr).await.unwrap();
    wait_for_peers(&push, 2).await;

    drop(pull_a);
    timeout(Duration::from_secs(5), async {
        while push.peer_count().await > 1 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("disconnect was not detected");

    // The remaining peer still receives.
    push.send(&5).await.unwrap();
    let value = timeout(Duration::from_secs(5), pull_b.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(value, Some(5));
}

#[tokio::test]
async fn test_push_drop_ends_the_stream() {
    let push = Push::<u32>::bind("127.0.0.1:0").await.unwrap();
    let addr = push.local_addr();

    let mut pull = Pull::<u32>::connect(addr).await.unwrap();
    wait_for_peers(&push, 1).await;

    push.send(&1).await.unwrap();
    drop(push);

    let first = timeout(Duration::from_secs(5), pull.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, Some(1));

    // After the producer is gone the stream ends cleanly, and stays ended.
    let second = timeout(Duration::from_secs(5), pull.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second, None);
    let third = pull.recv().await.unwrap();
    assert_eq!(third, None);
}

#[tokio::test]
async fn test_pull_as_stream() {
    let push = Push::<u32>::bind("127.0.0.1:0").await.unwrap();
    let addr = push.local_addr();

    let mut pull = Pull::<u32>::connect(addr).await.unwrap();
    wait_for_peers(&push, 1).await;

    for i in 0..3u32 {
        push.send(&i).await.unwrap();
    }
    drop(push);

    let mut seen = Vec::new();
    while let Some(item) = timeout(Duration::from_secs(5), pull.next())
        .await
        .expect("stream stalled")
    {
        seen.push(item.expect("stream errored"));
    }
    assert_eq!(seen, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_late_joiner_misses_earlier_messages() {
    let push = Push::<u32>::bind("127.0.0.1:0").await.unwrap();
    let addr = push.local_addr();

    let mut early = Pull::<u32>::connect(addr).await.unwrap();
    wait_for_peers(&push, 1).await;
    push.send(&1).await.unwrap();

    let mut late = Pull::<u32>::connect(addr).await.unwrap();
    wait_for_peers(&push, 2).await;
    push.send(&2).await.unwrap();

    assert_eq!(early.recv().await.unwrap(), Some(1));
    assert_eq!(early.recv().await.unwrap(), Some(2));

    // The late joiner only sees what was sent after it connected.
    let value = timeout(Duration::from_secs(5), late.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(value, Some(2));
}
