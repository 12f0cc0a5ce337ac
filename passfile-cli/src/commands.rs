//! Command handlers: each coordinates the cipher, codec, and one engine.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use passfile_core::store::{self, merge, query, remove};
use passfile_core::{encrypt_string, MasterKey, RecordFields, RemovalCriteria, SearchCriteria};

use crate::table;
use crate::{AddArgs, GetArgs, RmArgs};

pub fn add(store_path: &Path, key: &MasterKey, args: AddArgs) -> Result<()> {
    // The password is the only encrypted field; it never reaches the
    // merge engine as plaintext.
    let pass = args
        .pass
        .as_deref()
        .map(|pass| encrypt_string(key, pass))
        .transpose()?;

    let fields = RecordFields {
        id: Some(args.id),
        pass,
        mail: args.mail,
        url: args.url,
        text: args.text,
    };

    let mut db = store::load(store_path)?;
    let outcome = merge::apply(&mut db, &args.service_name, fields);
    store::save(store_path, &db)?;

    debug!(service = %args.service_name, ?outcome, "add finished");
    println!("Saved.");
    Ok(())
}

pub fn get(store_path: &Path, key: &MasterKey, args: GetArgs) -> Result<()> {
    let criteria = SearchCriteria {
        query: args.query,
        id: args.id,
        pass: args.pass,
        mail: args.mail,
        url: args.url,
        text: args.text,
    };

    let db = store::load_required(store_path)?;
    let results = query::search(&db, &criteria, key);

    if results.is_empty() {
        println!("No matching records found.");
        return Ok(());
    }

    let count: usize = results.values().map(Vec::len).sum();
    println!("{count} matching record(s)\n");
    print!("{}", table::render(&results));
    Ok(())
}

pub fn get_all(store_path: &Path, key: &MasterKey) -> Result<()> {
    let db = store::load_required(store_path)?;

    if db.is_empty() {
        println!("No data yet.");
        return Ok(());
    }

    let decrypted = query::decrypt_all(&db, key);
    let count: usize = decrypted.values().map(Vec::len).sum();
    println!("{count} record(s) in total\n");
    print!("{}", table::render(&decrypted));
    Ok(())
}

pub fn rm(store_path: &Path, args: RmArgs) -> Result<()> {
    let criteria = RemovalCriteria {
        id: args.id,
        mail: args.mail,
    };

    let mut db = store::load_required(store_path)?;
    let count = remove::remove(&mut db, &args.service_name, &criteria);

    if count == 0 {
        println!("No matching records found.");
        return Ok(());
    }

    store::save(store_path, &db)?;
    println!("Removed {count} record(s).");
    Ok(())
}
