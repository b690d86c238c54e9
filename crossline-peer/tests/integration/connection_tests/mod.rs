mod test_duplicate_answer_is_ignored;
mod test_host_and_join_connect;
