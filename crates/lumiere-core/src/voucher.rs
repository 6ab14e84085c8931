//! Loyalty points and voucher redemption arithmetic

use lumiere_api::commerce::{Voucher, VoucherStatus};

pub fn can_afford(points: u32, voucher: &Voucher) -> bool {
    points >= voucher.points_required
}

/// Balance left after redeeming, `None` when the customer is short
pub fn points_after_redeem(points: u32, voucher: &Voucher) -> Option<u32> {
    points.checked_sub(voucher.points_required)
}

/// Points still missing to redeem `voucher`
pub fn points_short(points: u32, voucher: &Voucher) -> u32 {
    voucher.points_required.saturating_sub(points)
}

/// Discount on an order of `total` VND, capped by the voucher's maximum
pub fn discount_for(voucher: &Voucher, total: u64) -> u64 {
    let percent = u64::from(voucher.discount_percent.min(100));
    let discount = total.saturating_mul(percent) / 100;
    voucher
        .max_discount
        .map_or(discount, |cap| discount.min(cap))
}

/// Active, in stock and not removed
pub fn redeemable(voucher: &Voucher) -> bool {
    voucher.status == VoucherStatus::Active && voucher.quantity > 0 && !voucher.is_deleted
}

/// Affordable vouchers first, then by points required, then by code
pub fn sort_by_affordability(vouchers: &mut [Voucher], points: u32) {
    vouchers.sort_by(|a, b| {
        (!can_afford(points, a), a.points_required, &a.code).cmp(&(
            !can_afford(points, b),
            b.points_required,
            &b.code,
        ))
    });
}
