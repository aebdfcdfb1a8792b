//! Integration tests for the SMTP client.
//!
//! A scripted fake server runs on the far end of an in-memory duplex pipe
//! and records every line the client sends.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::task::JoinHandle;

use relaymail_smtp::{
    Attachment, ClientOptions, ConnectConfig, Message, ReplyCode, SessionState, SmtpClient,
};

/// Reply the fake server gives to `RCPT TO`.
struct FakeServer {
    rcpt_reply: &'static str,
}

impl FakeServer {
    const fn accepting() -> Self {
        Self {
            rcpt_reply: "250 OK",
        }
    }

    /// Serves one session and returns the transcript of client lines.
    fn spawn(self, stream: DuplexStream) -> JoinHandle<Vec<String>> {
        tokio::spawn(async move {
            let (read, mut write) = tokio::io::split(stream);
            let mut lines = BufReader::new(read).lines();
            let mut transcript = Vec::new();
            let mut auth_step = 0;
            let mut in_data = false;

            write.write_all(b"220 smtp.test ESMTP ready\r\n").await.unwrap();

            while let Ok(Some(line)) = lines.next_line().await {
                transcript.push(line.clone());

                let reply: &str = if in_data {
                    if line != "." {
                        continue;
                    }
                    in_data = false;
                    "250 OK: queued"
                } else if auth_step > 0 {
                    auth_step += 1;
                    if auth_step == 2 { "334 UGFzc3dvcmQ6" } else {
                        auth_step = 0;
                        "235 Authentication successful"
                    }
                } else if line.starts_with("EHLO ") {
                    "250-smtp.test\r\n250-PIPELINING\r\n250-AUTH LOGIN PLAIN\r\n250 8BITMIME"
                } else if line == "AUTH LOGIN" {
                    auth_step = 1;
                    "334 VXNlcm5hbWU6"
                } else if line.starts_with("MAIL FROM:") {
                    "250 OK"
                } else if line.starts_with("RCPT TO:") {
                    self.rcpt_reply
                } else if line == "DATA" {
                    in_data = true;
                    "354 End data with <CR><LF>.<CR><LF>"
                } else if line == "QUIT" {
                    write.write_all(b"221 Bye\r\n").await.unwrap();
                    break;
                } else {
                    "500 Unrecognized command"
                };

                write.write_all(reply.as_bytes()).await.unwrap();
                write.write_all(b"\r\n").await.unwrap();
            }

            transcript
        })
    }
}

fn config_with_auth() -> ConnectConfig {
    ConnectConfig::builder("smtp.test")
        .credentials("user@smtp.test", "secret")
        .build()
}

fn full_message() -> Message {
    Message::new(
        "Build Bot <bot@smtp.test>",
        "dev@smtp.test",
        "Build succeeded",
        "All green.\n.signature",
    )
    .date("Tue, 1 Oct 2024 12:00:00 +0000")
    .html("<h1>All green.</h1>")
    .attach(
        Attachment::new("text/plain", "base64", "log.txt", "b2s=")
            .charset("utf-8")
            .content_id("log"),
    )
}

#[tokio::test]
async fn test_full_session_with_auth_html_and_attachment() {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let server = FakeServer::accepting().spawn(server_io);

    let mut client = SmtpClient::for_stream(ClientOptions::default());
    client
        .connect_with_stream(client_io, &config_with_auth())
        .await
        .unwrap();
    assert!(client.is_authenticated());

    client.send(&full_message()).await.unwrap();
    client.quit().await.unwrap();
    assert_eq!(client.state(), SessionState::Closed);

    let transcript = server.await.unwrap();
    assert_eq!(
        &transcript[..7],
        [
            "EHLO smtp.test",
            "AUTH LOGIN",
            "dXNlckBzbXRwLnRlc3Q=",
            "c2VjcmV0",
            "MAIL FROM:<bot@smtp.test>",
            "RCPT TO:<dev@smtp.test>",
            "DATA",
        ]
    );
    assert_eq!(transcript[7], "Subject: Build succeeded");
    assert_eq!(transcript[8], "From: Build Bot <bot@smtp.test>");
    assert_eq!(transcript[9], "To: <dev@smtp.test>");

    let end = transcript.iter().position(|l| l == ".").unwrap();
    assert_eq!(transcript[end - 1], "--MixBoundary--");
    assert_eq!(transcript.last().unwrap(), "QUIT");

    let data = &transcript[7..end];
    assert!(data.contains(&"..signature".to_string()));
    assert!(data.contains(&"Content-Type: text/plain; charset=utf-8; name=\"log.txt\"".to_string()));
    assert!(data.contains(&"Content-ID: <log>".to_string()));
    assert!(data.contains(&"--AlternativeBoundary--".to_string()));
}

#[tokio::test]
async fn test_rejected_recipient_aborts_transaction() {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let server = FakeServer {
        rcpt_reply: "550 5.1.1 No such user",
    }
    .spawn(server_io);

    let mut client = SmtpClient::for_stream(ClientOptions::default());
    client
        .connect_with_stream(client_io, &ConnectConfig::new("smtp.test"))
        .await
        .unwrap();

    let err = client.send(&full_message()).await.unwrap_err();
    assert!(err.is_protocol());
    assert_eq!(err.reply_code(), Some(ReplyCode::MAILBOX_UNAVAILABLE));
    assert!(err.to_string().contains("No such user"));

    client.close().await;
    let transcript = server.await.unwrap();
    assert_eq!(
        transcript,
        ["EHLO smtp.test", "MAIL FROM:<bot@smtp.test>", "RCPT TO:<dev@smtp.test>"]
    );
}

#[tokio::test]
async fn test_multiple_sends_on_one_session() {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let server = FakeServer::accepting().spawn(server_io);

    let mut client = SmtpClient::for_stream(ClientOptions::default());
    client
        .connect_with_stream(client_io, &ConnectConfig::new("smtp.test"))
        .await
        .unwrap();

    for subject in ["first", "second"] {
        let message = Message::new("a@smtp.test", "b@smtp.test", subject, "body");
        client.send(&message).await.unwrap();
    }
    client.close().await;
    client.close().await;

    let transcript = server.await.unwrap();
    let mail_commands = transcript.iter().filter(|l| l.starts_with("MAIL FROM:")).count();
    assert_eq!(mail_commands, 2);
    assert!(transcript.contains(&"Subject: first".to_string()));
    assert!(transcript.contains(&"Subject: second".to_string()));
}
