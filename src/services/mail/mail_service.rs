//! # 메일 발송 서비스 구현
//!
//! Gmail SMTP를 통한 비동기 메일 발송을 담당합니다.
//!
//! 발송은 호출자 관점에서 fire-and-forget입니다. 발송 태스크가
//! 스폰된 뒤 HTTP 응답은 발송 완료를 기다리지 않으며, 실패는
//! 로그로만 남고 재시도되지 않습니다.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::error;

use crate::config::MailConfig;
use crate::domain::entities::user::User;
use crate::errors::AppError;

/// 메일 발송 서비스
pub struct MailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: MailConfig,
}

impl MailService {
    /// Gmail SMTP 릴레이로 전송기를 구성합니다.
    pub fn new(config: MailConfig) -> Result<Self, AppError> {
        let credentials =
            Credentials::new(config.gmail_id.clone(), config.gmail_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay("smtp.gmail.com")
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .credentials(credentials)
            .build();

        Ok(Self { transport, config })
    }

    /// 메일을 비동기로 발송합니다 (fire-and-forget).
    ///
    /// 주소 파싱이나 발송 실패는 에러 로그만 남기고 무시됩니다.
    pub fn send(&self, to: &str, subject: &str, body: String) {
        let from: Mailbox = match self.config.gmail_id.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                error!("발신 주소 파싱 실패 ({}): {}", self.config.gmail_id, e);
                return;
            }
        };

        let to_mailbox: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                error!("수신 주소 파싱 실패 ({}): {}", to, e);
                return;
            }
        };

        let message = match Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .body(body)
        {
            Ok(message) => message,
            Err(e) => {
                error!("메일 작성 실패: {}", e);
                return;
            }
        };

        let transport = self.transport.clone();
        let to = to.to_string();
        actix_web::rt::spawn(async move {
            if let Err(e) = transport.send(message).await {
                error!("메일 발송 실패 ({}): {}", to, e);
            }
        });
    }

    /// 비밀번호 재설정 링크 메일 발송
    pub fn send_reset_mail(&self, user: &User, reset_token: &str) {
        let link = format!("{}{}", self.config.reset_password_link, reset_token);
        let body = format!(
            "Hey {}! We got to know You forgot your Password. \
             Click on the following link to create a new password.\n\
             Link: {}\n\
             If this was not you Please ghost this email.\n\
             Regards,\nQuery Wizard",
            user.username, link
        );
        self.send(&user.email, "Regarding Changing Your Password.", body);
    }

    /// 이메일 인증 링크 메일 발송
    pub fn send_verification_mail(&self, user: &User, verify_token: &str) {
        let link = format!("{}{}", self.config.verify_email_link, verify_token);
        let body = format!(
            "Hey! This Email was added to the account with username {}. \
             Click on the following link to verify the email.\n\
             If this was not you, Please contact us.\n\
             Link: {}",
            user.username, link
        );
        self.send(&user.email, "Regarding Email Verification!", body);
    }
}
