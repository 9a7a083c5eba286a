use anchor_lang::prelude::*;
use core::result::Result;

use crate::error::StoneError;

/// Escrowed amount redeemable at or after `expiration_time`.
/// Seeds: [b"option", id.to_le_bytes()]
#[account]
#[derive(Default, Debug)]
pub struct VestingOption {
    pub id: u64,
    /// Token units held in custody for this record (> 0 while the record exists).
    pub amount: u64,
    pub creation_time: i64,
    pub expiration_time: i64,
    pub bump: u8,
}

impl VestingOption {
    pub const SEED_PREFIX: &'static [u8] = b"option";

    pub const SIZE: usize =
        8 + // id
        8 + // amount
        8 + // creation_time
        8 + // expiration_time
        1;  // bump

    pub fn new(id: u64, amount: u64, now_ts: i64, expiration_time: i64, bump: u8) -> Result<Self, StoneError> {
        if amount == 0 {
            return Err(StoneError::InvalidAmount);
        }
        if expiration_time <= now_ts {
            return Err(StoneError::InvalidSchedule);
        }
        Ok(Self {
            id,
            amount,
            creation_time: now_ts,
            expiration_time,
            bump,
        })
    }

    pub fn is_matured(&self, now_ts: i64) -> bool {
        now_ts >= self.expiration_time
    }

    pub fn ensure_matured(&self, now_ts: i64) -> Result<(), StoneError> {
        if !self.is_matured(now_ts) {
            return Err(StoneError::NotMatured);
        }
        Ok(())
    }

    /// Carve `amount` out of this record for a sibling with the same maturity.
    /// The remainder must stay non-zero, and the record must not have matured yet
    /// (the sibling's creation time has to precede the shared expiration). Returns the sibling.
    pub fn split_off(&mut self, id: u64, amount: u64, now_ts: i64, bump: u8) -> Result<Self, StoneError> {
        if amount == 0 || amount >= self.amount {
            return Err(StoneError::InvalidAmount);
        }
        if self.is_matured(now_ts) {
            return Err(StoneError::InvalidSchedule);
        }
        self.amount -= amount;
        Ok(Self {
            id,
            amount,
            creation_time: now_ts,
            expiration_time: self.expiration_time,
            bump,
        })
    }

    /// Fold an earlier-maturing record into this one. `from` must be closed afterwards.
    pub fn absorb(&mut self, from: &VestingOption) -> Result<(), StoneError> {
        if from.id == self.id {
            return Err(StoneError::SameRecord);
        }
        if from.expiration_time >= self.expiration_time {
            return Err(StoneError::InvalidSchedule);
        }
        self.amount = self
            .amount
            .checked_add(from.amount)
            .ok_or(StoneError::MathOverflow)?;
        Ok(())
    }
}

/// Ownership entry for one option, kept apart from the option's accounting data.
/// Seeds: [b"title", id.to_le_bytes()]
#[account]
#[derive(Default, Debug)]
pub struct OptionTitle {
    pub option_id: u64,
    pub owner: Pubkey,
    /// Single approved delegate; default pubkey = none.
    pub approved: Pubkey,
    pub bump: u8,
}

impl OptionTitle {
    pub const SEED_PREFIX: &'static [u8] = b"title";

    pub const SIZE: usize =
        8 +  // option_id
        32 + // owner
        32 + // approved
        1;   // bump

    pub fn new(option_id: u64, owner: Pubkey, bump: u8) -> Result<Self, StoneError> {
        if owner == Pubkey::default() {
            return Err(StoneError::InvalidAddress);
        }
        Ok(Self {
            option_id,
            owner,
            approved: Pubkey::default(),
            bump,
        })
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<(), StoneError> {
        if self.owner != *caller {
            return Err(StoneError::NotAuthorized);
        }
        Ok(())
    }

    /// Owner or approved delegate.
    pub fn ensure_authorized(&self, caller: &Pubkey) -> Result<(), StoneError> {
        let delegated = self.approved != Pubkey::default() && self.approved == *caller;
        if self.owner != *caller && !delegated {
            return Err(StoneError::NotAuthorized);
        }
        Ok(())
    }

    pub fn approve(&mut self, delegate: Pubkey) {
        self.approved = delegate;
    }

    /// Hand the record to `new_owner`; any approval is cleared.
    pub fn transfer_to(&mut self, new_owner: Pubkey) -> Result<(), StoneError> {
        if new_owner == Pubkey::default() {
            return Err(StoneError::InvalidAddress);
        }
        self.owner = new_owner;
        self.approved = Pubkey::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VestingConfig;

    fn key(b: u8) -> Pubkey {
        Pubkey::new_from_array([b; 32])
    }

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn grant_validation() {
        assert!(matches!(
            VestingOption::new(0, 0, NOW, NOW + 1_000, 255),
            Err(StoneError::InvalidAmount)
        ));
        assert!(matches!(
            VestingOption::new(0, 1_000, NOW, NOW, 255),
            Err(StoneError::InvalidSchedule)
        ));
        assert!(matches!(
            VestingOption::new(0, 1_000, NOW, NOW - 1_000, 255),
            Err(StoneError::InvalidSchedule)
        ));
        assert!(matches!(
            OptionTitle::new(0, Pubkey::default(), 255),
            Err(StoneError::InvalidAddress)
        ));

        let opt = VestingOption::new(4, 1_000, NOW, NOW + 1_000, 255).unwrap();
        assert_eq!(opt.id, 4);
        assert_eq!(opt.amount, 1_000);
        assert_eq!(opt.creation_time, NOW);
        assert_eq!(opt.expiration_time, NOW + 1_000);
    }

    #[test]
    fn matures_exactly_at_expiration() {
        let opt = VestingOption::new(0, 1_000, NOW, NOW + 1_000, 255).unwrap();
        assert!(matches!(
            opt.ensure_matured(NOW + 999),
            Err(StoneError::NotMatured)
        ));
        assert!(opt.ensure_matured(NOW + 1_000).is_ok());
        assert!(opt.ensure_matured(NOW + 5_000).is_ok());
    }

    #[test]
    fn split_conserves_amount() {
        let mut opt = VestingOption::new(0, 1_000, NOW, NOW + 1_000, 255).unwrap();
        let child = opt.split_off(1, 333, NOW + 10, 254).unwrap();

        assert_eq!(opt.amount, 667);
        assert_eq!(child.amount, 333);
        assert_eq!(opt.amount + child.amount, 1_000);
        assert_eq!(child.expiration_time, opt.expiration_time);
        assert_eq!(child.creation_time, NOW + 10);
        assert_eq!(opt.creation_time, NOW);
        assert_eq!(child.id, 1);
    }

    #[test]
    fn split_must_leave_a_remainder() {
        let mut opt = VestingOption::new(0, 1_000, NOW, NOW + 1_000, 255).unwrap();
        assert!(matches!(
            opt.split_off(1, 0, NOW, 255),
            Err(StoneError::InvalidAmount)
        ));
        assert!(matches!(
            opt.split_off(1, 1_000, NOW, 255),
            Err(StoneError::InvalidAmount)
        ));
        assert!(matches!(
            opt.split_off(1, 1_001, NOW, 255),
            Err(StoneError::InvalidAmount)
        ));
        assert_eq!(opt.amount, 1_000);
        assert!(opt.split_off(1, 999, NOW, 255).is_ok());
        assert_eq!(opt.amount, 1);
    }

    #[test]
    fn split_after_maturity_is_rejected() {
        let mut opt = VestingOption::new(0, 1_000, 100, 200, 255).unwrap();
        assert!(matches!(
            opt.split_off(1, 400, 500, 255),
            Err(StoneError::InvalidSchedule)
        ));
        assert!(matches!(
            opt.split_off(1, 400, 200, 255),
            Err(StoneError::InvalidSchedule)
        ));
        assert_eq!(opt.amount, 1_000);

        let child = opt.split_off(1, 400, 199, 255).unwrap();
        assert!(child.expiration_time > child.creation_time);
    }

    #[test]
    fn merge_keeps_later_maturity() {
        let e0 = NOW + 1_000;
        let e1 = NOW + 5_000;
        let early = VestingOption::new(0, 1_000, NOW, e0, 255).unwrap();
        let mut late = VestingOption::new(1, 3_000, NOW, e1, 255).unwrap();

        late.absorb(&early).unwrap();
        assert_eq!(late.amount, 4_000);
        assert_eq!(late.expiration_time, e1);
    }

    #[test]
    fn merge_rejects_reverse_order_and_equal_maturity() {
        let early = VestingOption::new(0, 1_000, NOW, NOW + 1_000, 255).unwrap();
        let late = VestingOption::new(1, 3_000, NOW, NOW + 5_000, 255).unwrap();
        let twin = VestingOption::new(2, 500, NOW, NOW + 5_000, 255).unwrap();

        let mut into_early = early.clone();
        assert!(matches!(
            into_early.absorb(&late),
            Err(StoneError::InvalidSchedule)
        ));
        assert_eq!(into_early.amount, 1_000);

        let mut into_late = late.clone();
        assert!(matches!(
            into_late.absorb(&twin),
            Err(StoneError::InvalidSchedule)
        ));

        let mut same = late.clone();
        assert!(matches!(same.absorb(&late), Err(StoneError::SameRecord)));
    }

    #[test]
    fn exercise_is_owner_only_split_honors_delegate() {
        let mut title = OptionTitle::new(0, key(1), 255).unwrap();
        title.approve(key(2));

        assert!(title.ensure_owner(&key(1)).is_ok());
        assert!(matches!(
            title.ensure_owner(&key(2)),
            Err(StoneError::NotAuthorized)
        ));

        assert!(title.ensure_authorized(&key(1)).is_ok());
        assert!(title.ensure_authorized(&key(2)).is_ok());
        assert!(matches!(
            title.ensure_authorized(&key(3)),
            Err(StoneError::NotAuthorized)
        ));
    }

    #[test]
    fn default_pubkey_is_never_a_delegate() {
        let title = OptionTitle::new(0, key(1), 255).unwrap();
        assert!(matches!(
            title.ensure_authorized(&Pubkey::default()),
            Err(StoneError::NotAuthorized)
        ));
    }

    #[test]
    fn transfer_clears_approval() {
        let mut title = OptionTitle::new(0, key(1), 255).unwrap();
        title.approve(key(2));
        title.transfer_to(key(3)).unwrap();

        assert_eq!(title.owner, key(3));
        assert_eq!(title.approved, Pubkey::default());
        assert!(matches!(
            title.ensure_authorized(&key(2)),
            Err(StoneError::NotAuthorized)
        ));
        assert!(matches!(
            title.transfer_to(Pubkey::default()),
            Err(StoneError::InvalidAddress)
        ));
    }

    /// Ledger model: options plus a custody balance, driven through the same
    /// record and config calls the instructions make. A failed call leaves the
    /// model untouched, as a failed transaction would.
    struct Ledger {
        cfg: VestingConfig,
        options: Vec<VestingOption>,
        custody: u64,
    }

    impl Ledger {
        fn new() -> Self {
            Self {
                cfg: VestingConfig::default(),
                options: Vec::new(),
                custody: 0,
            }
        }

        // grant_option: transfer in, issue_id, lock
        fn grant(&mut self, amount: u64, now: i64, expiration: i64) -> Option<u64> {
            let opt = VestingOption::new(self.cfg.next_option_id, amount, now, expiration, 255).ok()?;
            self.custody += amount;
            let id = self.cfg.issue_id().unwrap();
            assert_eq!(id, opt.id);
            self.cfg.lock(amount).unwrap();
            self.options.push(opt);
            Some(id)
        }

        // split_option: issue_id, split_off
        fn split(&mut self, idx: usize, amount: u64, now: i64) {
            let mut source = self.options[idx].clone();
            let mut cfg = self.cfg.clone();
            let id = cfg.issue_id().unwrap();
            if let Ok(child) = source.split_off(id, amount, now, 255) {
                self.cfg = cfg;
                self.options[idx] = source;
                self.options.push(child);
            }
        }

        // merge_option: absorb, retire
        fn merge(&mut self, from: usize, to: usize) {
            let from_opt = self.options[from].clone();
            if self.options[to].absorb(&from_opt).is_ok() {
                self.cfg.retire().unwrap();
                self.options.remove(from);
            }
        }

        // exercise_option: ensure_matured, release, transfer out
        fn exercise(&mut self, idx: usize, now: i64) -> u64 {
            if self.options[idx].ensure_matured(now).is_err() {
                return 0;
            }
            let opt = self.options.remove(idx);
            self.cfg.release(opt.amount).unwrap();
            self.custody -= opt.amount;
            opt.amount
        }

        fn check(&self) {
            let sum: u64 = self.options.iter().map(|o| o.amount).sum();
            assert_eq!(self.cfg.total_locked, sum);
            assert_eq!(self.cfg.live_options, self.options.len() as u64);
            assert_eq!(self.custody, sum);
            self.cfg.ensure_covered(self.custody).unwrap();
            assert!(self.options.iter().all(|o| o.amount > 0));
            assert!(self.options.iter().all(|o| o.expiration_time > o.creation_time));
            assert!(self.options.iter().all(|o| o.id < self.cfg.next_option_id));
        }
    }

    #[test]
    fn conservation_over_mixed_operations() {
        // Deterministic LCG so the sequence is reproducible.
        let mut seed: u64 = 0x5eed;
        let mut next = move |m: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % m
        };

        let mut ledger = Ledger::new();
        let mut now = NOW;
        let mut paid_out = 0u64;
        let mut granted = 0u64;

        for _ in 0..2_000 {
            now += next(50) as i64;
            match next(4) {
                0 => {
                    let amount = next(5_000);
                    let expiration = now + next(3_000) as i64;
                    if ledger.grant(amount, now, expiration).is_some() {
                        granted += amount;
                    }
                }
                1 if !ledger.options.is_empty() => {
                    let i = next(ledger.options.len() as u64) as usize;
                    let amount = next(ledger.options[i].amount + 1);
                    ledger.split(i, amount, now);
                }
                2 if ledger.options.len() > 1 => {
                    let a = next(ledger.options.len() as u64) as usize;
                    let b = next(ledger.options.len() as u64) as usize;
                    if a != b {
                        ledger.merge(a, b);
                    }
                }
                3 if !ledger.options.is_empty() => {
                    let i = next(ledger.options.len() as u64) as usize;
                    paid_out += ledger.exercise(i, now);
                }
                _ => {}
            }
            ledger.check();
        }

        assert_eq!(granted, paid_out + ledger.custody);
    }

    #[test]
    fn grant_then_exercise_round_trip() {
        let mut ledger = Ledger::new();
        ledger.grant(1_000, NOW, NOW + 1_000).unwrap();

        assert_eq!(ledger.exercise(0, NOW + 999), 0);
        assert_eq!(ledger.options.len(), 1);

        assert_eq!(ledger.exercise(0, NOW + 1_000), 1_000);
        assert!(ledger.options.is_empty());
        assert_eq!(ledger.custody, 0);
        assert_eq!(ledger.cfg.total_locked, 0);
        assert_eq!(ledger.cfg.live_options, 0);
        ledger.check();
    }
}
