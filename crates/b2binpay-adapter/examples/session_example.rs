/*
[INPUT]:  B2BINPAY_KEY / B2BINPAY_SECRET environment variables
[OUTPUT]: Sandbox session details and wallet list
[POS]:    Examples - session lifecycle demonstration
[UPDATE]: When the session flow changes
*/

use b2binpay_adapter::*;

/// Example: session lifecycle against the sandbox
///
/// 1. Create a client with credentials
/// 2. Dispatch a request (the client logs in on demand)
/// 3. Export the session snapshot for reuse by a later process
#[tokio::main]
async fn main() {
    println!("=== B2BinPay Session Example ===\n");

    let (key, secret) = match (std::env::var("B2BINPAY_KEY"), std::env::var("B2BINPAY_SECRET")) {
        (Ok(key), Ok(secret)) => (key, secret),
        _ => {
            eprintln!("Set B2BINPAY_KEY and B2BINPAY_SECRET to run this example");
            return;
        }
    };

    // Step 1: Create client
    let client = match B2BinPayClient::with_credentials(ClientConfig::sandbox(), key, secret) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}", client.base_url());

    // Step 2: First dispatch authenticates and verifies the login signature
    match client.get_wallets().await {
        Ok(wallets) => {
            println!("✓ {} wallet(s)", wallets.data.len());
            for wallet in wallets.data {
                println!("  - {} confirmed={:?}", wallet.id, wallet.attributes.balance_confirmed);
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            return;
        }
    }

    // Step 3: Snapshot
    let state = client.session().state();
    println!("\nSession status: {:?}", client.session().status());
    println!("  access expires:  {:?}", state.access_expires_at);
    println!("  refresh expires: {:?}", state.refresh_expires_at);
    if let Some(snapshot) = client.session().snapshot() {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("\n✓ Snapshot ready ({} bytes)", json.len()),
            Err(e) => eprintln!("Failed to serialize snapshot: {}", e),
        }
    }

    println!("\n✓ Session example complete");
}
