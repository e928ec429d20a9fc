//! Redis-backed storage for one-time codes.
//!
//! Each live code is a plain string value under `otp:{mobile_number}`,
//! written with `SET ... NX EX` so Redis enforces the expiry and refuses to
//! overwrite a live code.

use std::time::Duration;

use domain::services::{OtpError, OtpStore};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

const KEY_PREFIX: &str = "otp:";

fn otp_key(mobile_number: &str) -> String {
    format!("{KEY_PREFIX}{mobile_number}")
}

/// `SET key code NX EX secs`. Replies `OK` when written, nil otherwise.
fn set_if_absent_cmd(mobile_number: &str, code: &str, ttl: Duration) -> redis::Cmd {
    // Redis rejects EX 0.
    let secs = ttl.as_secs().max(1);
    let mut cmd = redis::cmd("SET");
    cmd.arg(otp_key(mobile_number))
        .arg(code)
        .arg("NX")
        .arg("EX")
        .arg(secs);
    cmd
}

fn store_error(err: redis::RedisError) -> OtpError {
    OtpError::Store(err.to_string())
}

/// OTP store backed by a multiplexed Redis connection.
#[derive(Clone)]
pub struct RedisOtpStore {
    conn: ConnectionManager,
}

impl RedisOtpStore {
    /// Opens a managed connection to `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, mobile_number: &str) -> Result<Option<String>, OtpError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(otp_key(mobile_number))
            .await
            .map_err(store_error)
    }

    async fn save_if_absent(
        &self,
        mobile_number: &str,
        code: &str,
        ttl: Duration,
    ) -> Result<bool, OtpError> {
        let mut conn = self.conn.clone();
        let reply: Option<String> = set_if_absent_cmd(mobile_number, code, ttl)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(reply.is_some())
    }

    async fn delete(&self, mobile_number: &str) -> Result<(), OtpError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(otp_key(mobile_number))
            .await
            .map_err(store_error)
    }

    async fn ping(&self) -> Result<(), OtpError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_key_format() {
        assert_eq!(otp_key("09121234567"), "otp:09121234567");
    }

    #[test]
    fn test_set_if_absent_is_one_conditional_command() {
        let cmd = set_if_absent_cmd("09121234567", "123456", Duration::from_secs(60));
        let packed = String::from_utf8(cmd.get_packed_command()).unwrap();
        assert_eq!(
            packed,
            "*6\r\n$3\r\nSET\r\n$15\r\notp:09121234567\r\n$6\r\n123456\r\n\
             $2\r\nNX\r\n$2\r\nEX\r\n$2\r\n60\r\n"
        );
    }

    #[test]
    fn test_set_if_absent_never_sends_zero_expiry() {
        let cmd = set_if_absent_cmd("09121234567", "123456", Duration::from_millis(200));
        let packed = String::from_utf8(cmd.get_packed_command()).unwrap();
        assert!(packed.ends_with("$2\r\nEX\r\n$1\r\n1\r\n"));
    }

    #[test]
    fn test_store_error_maps_message() {
        let err = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
        match store_error(err) {
            OtpError::Store(msg) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
