//! Startup seeding of the default accounts

use account_core::{AccountStatus, NewUser};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::directory::DirectoryService;
use super::error::ServiceResult;

/// An account created at startup when its username is free
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
}

/// The elevated `admin` account and the ordinary `test` account
pub const DEFAULT_ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount {
        username: "admin",
        password: "123456",
        email: "admin@example.com",
        phone: "13800138000",
    },
    SeedAccount {
        username: "test",
        password: "123456",
        email: "test@example.com",
        phone: "13800138001",
    },
];

/// Creates seed accounts idempotently
pub struct BootstrapService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BootstrapService<'a> {
    /// Create a new BootstrapService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Seed the default accounts. Returns how many were created.
    pub async fn seed_defaults(&self) -> ServiceResult<usize> {
        self.seed(&DEFAULT_ACCOUNTS).await
    }

    /// Create each account whose username is not taken by any record,
    /// soft-deleted ones included
    #[instrument(skip(self, accounts))]
    pub async fn seed(&self, accounts: &[SeedAccount]) -> ServiceResult<usize> {
        let directory = DirectoryService::new(self.ctx);
        let mut created = 0;

        for account in accounts {
            if directory.exists_by_username(account.username).await? {
                info!(username = account.username, "Seed account exists, skipping");
                continue;
            }

            let password = self.ctx.credential_policy().encode(account.password)?;
            let user = directory
                .create(
                    NewUser::new(account.username, password, account.email)
                        .with_phone(account.phone)
                        .with_status(AccountStatus::Active),
                )
                .await?;
            info!(user_id = %user.id, username = account.username, "Seed account created");
            created += 1;
        }

        Ok(created)
    }
}
