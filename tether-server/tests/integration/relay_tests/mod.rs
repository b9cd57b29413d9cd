mod test_disconnect;
