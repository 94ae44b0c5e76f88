//! Checkout commands: shipping details, payment, verification.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};

use harvest_commerce::checkout::{OrderSummary, ShippingInfo};
use harvest_session::CartSession;

use super::{ensure_signed_in, CheckoutArgs, CheckoutCommand, Friendly};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CheckoutCommand::Shipping => shipping(ctx).await,
        CheckoutCommand::Pay { yes } => pay(yes, ctx).await,
        CheckoutCommand::Verify { reference } => verify(&reference, ctx).await,
    }
}

async fn shipping(ctx: &Context) -> Result<()> {
    ensure_signed_in(ctx, "checkout shipping").await?;

    // No saved address surfaces as an error; start from a blank form then.
    let existing = ctx
        .client
        .checkout()
        .shipping_address()
        .await
        .unwrap_or_default();

    let info = ShippingInfo {
        first_name: prompt("First name", &existing.first_name)?,
        last_name: prompt("Last name", &existing.last_name)?,
        email: prompt("Email", &existing.email)?,
        address: prompt("Street address", &existing.address)?,
        city: prompt("City", &existing.city)?,
        state: prompt("State", &existing.state)?,
        zip_code: prompt("PIN code", &existing.zip_code)?,
    };
    info.is_complete().friendly()?;

    let spinner = ctx.output.spinner("Saving address...");
    let result = ctx.client.checkout().save_shipping(&info).await;
    spinner.finish_and_clear();
    let saved = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&saved);
        return Ok(());
    }

    ctx.output.success(&saved.message);
    ctx.output.kv("Ship to", &saved.shipping_info.full_name());
    ctx.output.kv(
        "Address",
        &format!(
            "{}, {}, {} {}",
            saved.shipping_info.address,
            saved.shipping_info.city,
            saved.shipping_info.state,
            saved.shipping_info.zip_code
        ),
    );
    Ok(())
}

async fn pay(yes: bool, ctx: &Context) -> Result<()> {
    ensure_signed_in(ctx, "checkout pay").await?;

    let mut session = CartSession::open(ctx.client.clone()).friendly()?;

    let spinner = ctx.output.spinner("Loading cart...");
    let result = session.refresh().await;
    spinner.finish_and_clear();
    result.friendly()?;

    if session.is_empty() {
        bail!("Your cart is empty. Add something first.");
    }

    // Shown before the redirect so the shopper sees the amount the gateway
    // will collect.
    let summary = OrderSummary::for_cart(session.cart()).friendly()?;

    ctx.output.header("Order summary");
    ctx.output.kv("Items", &session.item_count().to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv("Tax (8%)", &summary.tax.display());
    if summary.shipping_charged() {
        ctx.output.kv("Shipping", &summary.shipping.display());
    } else {
        ctx.output.kv("Shipping", "Free");
    }
    ctx.output.kv("Total", &summary.total.display());

    if !yes {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Proceed to payment?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Payment cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Contacting payment gateway...");
    let result = ctx
        .client
        .checkout()
        .initialize_payment(session.code())
        .await;
    spinner.finish_and_clear();
    let init = result.friendly()?;

    if ctx.output.is_json() {
        ctx.output.json(&init);
        return Ok(());
    }

    ctx.output.success("Payment initialized");
    ctx.output.kv("Reference", &init.reference);
    ctx.output.kv("Pay at", &init.authorization_url);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Complete the payment in your browser, then run `harvest checkout verify {}`.",
        init.reference
    ));
    Ok(())
}

async fn verify(reference: &str, ctx: &Context) -> Result<()> {
    ensure_signed_in(ctx, "checkout verify").await?;

    let spinner = ctx.output.spinner("Verifying payment...");
    let result = ctx.client.checkout().verify_payment(reference).await;
    spinner.finish_and_clear();
    let verification = result.friendly()?;

    if verification.is_success() {
        // The paid cart stays on the backend under the old code; a fresh
        // code starts the next one empty.
        let mut session = CartSession::open(ctx.client.clone()).friendly()?;
        session.reset_after_payment().friendly()?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&verification);
        return Ok(());
    }

    if !verification.is_success() {
        ctx.output.warn(&format!(
            "Payment status: {} ({})",
            verification.status, verification.message
        ));
        return Ok(());
    }

    ctx.output.success(&verification.message);
    if let Some(amount) = verification.amount {
        ctx.output.kv("Amount", &amount.display());
    }
    if let Some(date) = &verification.payment_date {
        ctx.output.kv("Paid", date);
    }
    ctx.output.info("Your cart has been reset for the next order.");
    Ok(())
}

fn prompt(label: &str, current: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(label);
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?)
}
